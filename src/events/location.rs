use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::MessageId;

use crate::mask::{format, SearchRequest, StoreLookup, DEFAULT_RADIUS};
use crate::pending::{PendingRadii, PromptKey};
use crate::utils::{Messenger, Prompt, Render};
use crate::{Data, Error};

pub const SEARCHING: &str = "검색중이에요. 잠시 기다려주세요.";
pub const NOT_A_LOCATION: &str = "위치 정보가 담긴 메세지가 아니에요.";
pub const UNSUPPORTED_LOCATION: &str = "공적 마스크 API에서 지원하지 않는 위치에요.";
pub const FETCH_FAILED: &str = "저런! 마스크 판매처 정보를 불러오는 데 실패했어요. 다시 시도해 주세요.";

/// The parts of an inbound message the location handler looks at.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationMessage {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    /// The message this one replies to, if any.
    pub replied_to: Option<PromptKey>,
    /// (latitude, longitude)
    pub coordinates: Option<(f64, f64)>,
}

impl LocationMessage {
    pub fn from_message(msg: &Message) -> Self {
        Self {
            chat_id: msg.chat.id,
            message_id: msg.id,
            replied_to: msg
                .reply_to_message()
                .map(|replied| PromptKey::new(replied.id, replied.chat.id)),
            coordinates: msg.location().map(|loc| (loc.latitude, loc.longitude)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocationOutcome {
    /// The input was rejected before any lookup.
    Rejected(&'static str),
    /// The placeholder now shows the store list.
    Delivered,
    /// The lookup failed and the placeholder shows the failure text.
    Failed,
}

/// Radius requested for the prompt this message replies to, together with
/// the key to evict once the lookup is done.
fn resolve_radius(pending: &PendingRadii, replied_to: Option<PromptKey>) -> (u32, Option<PromptKey>) {
    replied_to
        .and_then(|key| pending.get(&key).map(|radius| (radius, Some(key))))
        .unwrap_or((DEFAULT_RADIUS, None))
}

fn validate(request: &LocationMessage, radius: u32) -> Result<SearchRequest, &'static str> {
    let (latitude, longitude) = request.coordinates.ok_or(NOT_A_LOCATION)?;
    SearchRequest::new(latitude, longitude, radius).ok_or(UNSUPPORTED_LOCATION)
}

async fn fetch_and_render<M, L>(
    messenger: &M,
    lookup: &L,
    chat_id: ChatId,
    placeholder: MessageId,
    search: &SearchRequest,
) -> Result<(), Error>
where
    M: Messenger + ?Sized,
    L: StoreLookup + ?Sized,
{
    let result = lookup.stores_by_geo(search).await?;
    let reply = format::render_reply(search.radius, &result);
    messenger
        .edit_text(chat_id, placeholder, &reply, Render::Rich)
        .await
}

/// Looks up stores around the sent location and edits a placeholder reply
/// with the result.
pub async fn handle_location<M, L>(
    messenger: &M,
    lookup: &L,
    pending: &PendingRadii,
    request: &LocationMessage,
) -> Result<LocationOutcome, Error>
where
    M: Messenger + ?Sized,
    L: StoreLookup + ?Sized,
{
    let (radius, consumed) = resolve_radius(pending, request.replied_to);

    let search = match validate(request, radius) {
        Ok(search) => search,
        Err(text) => {
            messenger
                .send_reply(request.chat_id, request.message_id, text, Prompt::None)
                .await?;
            return Ok(LocationOutcome::Rejected(text));
        }
    };

    let placeholder = messenger
        .send_reply(request.chat_id, request.message_id, SEARCHING, Prompt::None)
        .await?;

    let outcome = match fetch_and_render(messenger, lookup, request.chat_id, placeholder, &search).await {
        Ok(()) => LocationOutcome::Delivered,
        Err(e) => {
            tracing::error!(
                "판매처 조회 실패 (lat={}, lng={}, m={}): {e}",
                search.latitude,
                search.longitude,
                search.radius
            );
            if let Err(e) = messenger
                .edit_text(request.chat_id, placeholder, FETCH_FAILED, Render::Plain)
                .await
            {
                tracing::warn!("실패 메세지 수정 실패: {e}");
            }
            LocationOutcome::Failed
        }
    };

    if let Some(key) = consumed {
        pending.remove(&key);
    }

    Ok(outcome)
}

pub async fn endpoint(bot: Bot, msg: Message, data: Arc<Data>) -> Result<(), Error> {
    let request = LocationMessage::from_message(&msg);
    let outcome = handle_location(&bot, &data.mask_api, &data.pending_radii, &request).await?;
    tracing::info!("위치 처리 완료 (chat={}): {:?}", msg.chat.id.0, outcome);
    Ok(())
}
