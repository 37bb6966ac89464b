use teloxide::types::{ChatId, MessageId};

use crate::mask::{DEFAULT_RADIUS, MAX_RADIUS, MIN_RADIUS};
use crate::pending::{PendingRadii, PromptKey};
use crate::utils::{Messenger, Prompt};
use crate::Error;

pub const OUT_OF_RANGE_NOTICE: &str = "반경이 너무 크거나 작아요. 기본값인 500미터로 고정할게요.\n";
pub const LOCATION_PROMPT: &str = "이 메세지의 답변 메세지로 현재 위치를 보내주세요.";

/// Radius picked from the `/lookup` argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadiusChoice {
    pub radius: u32,
    /// The argument was rejected and the default used instead.
    pub fell_back: bool,
}

/// Parses the first whitespace-separated token of `args`.
pub fn parse_radius(args: &str) -> RadiusChoice {
    let Some(token) = args.split_whitespace().next() else {
        return RadiusChoice {
            radius: DEFAULT_RADIUS,
            fell_back: false,
        };
    };

    match token.parse::<i64>() {
        Ok(n) if (i64::from(MIN_RADIUS)..=i64::from(MAX_RADIUS)).contains(&n) => RadiusChoice {
            radius: n as u32,
            fell_back: false,
        },
        _ => {
            tracing::info!("잘못된 반경 입력: {token}");
            RadiusChoice {
                radius: DEFAULT_RADIUS,
                fell_back: true,
            }
        }
    }
}

pub fn prompt_text(choice: RadiusChoice) -> String {
    if choice.fell_back {
        format!("{OUT_OF_RANGE_NOTICE}{LOCATION_PROMPT}")
    } else {
        LOCATION_PROMPT.to_string()
    }
}

/// Answers `/lookup [radius]` with a force-reply prompt and remembers the
/// radius under the prompt's id until the user replies with a location.
pub async fn handle_radius_command<M: Messenger + ?Sized>(
    messenger: &M,
    pending: &PendingRadii,
    chat_id: ChatId,
    message_id: MessageId,
    args: &str,
) -> Result<u32, Error> {
    let choice = parse_radius(args);
    let sent = messenger
        .send_reply(chat_id, message_id, &prompt_text(choice), Prompt::ForceReply)
        .await?;

    pending.insert(PromptKey::new(sent, chat_id), choice.radius);
    tracing::debug!(
        "반경 {}m 대기 등록: chat={} prompt={}",
        choice.radius,
        chat_id.0,
        sent.0
    );
    Ok(choice.radius)
}
