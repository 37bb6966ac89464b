use async_trait::async_trait;
use teloxide::payloads::{EditMessageTextSetters, SendMessageSetters};
use teloxide::prelude::*;
use teloxide::types::{ForceReply, LinkPreviewOptions, MessageId, ParseMode, ReplyParameters};

use crate::Error;

/// How an outgoing reply asks the client to respond.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    None,
    /// Opens the reply box so the user's next message threads back to ours.
    ForceReply,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Render {
    Plain,
    /// HTML with link previews disabled.
    Rich,
}

/// The two chat operations the handlers need.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Replies to `reply_to` and returns the id of the sent message.
    async fn send_reply(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        text: &str,
        prompt: Prompt,
    ) -> Result<MessageId, Error>;

    async fn edit_text(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
        render: Render,
    ) -> Result<(), Error>;
}

fn no_link_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

#[async_trait]
impl Messenger for Bot {
    async fn send_reply(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        text: &str,
        prompt: Prompt,
    ) -> Result<MessageId, Error> {
        let request = self
            .send_message(chat_id, text)
            .reply_parameters(ReplyParameters::new(reply_to));
        let sent = match prompt {
            Prompt::None => request.await?,
            Prompt::ForceReply => request.reply_markup(ForceReply::new()).await?,
        };
        Ok(sent.id)
    }

    async fn edit_text(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
        render: Render,
    ) -> Result<(), Error> {
        let request = self.edit_message_text(chat_id, message_id, text);
        match render {
            Render::Plain => request.await?,
            Render::Rich => {
                request
                    .parse_mode(ParseMode::Html)
                    .link_preview_options(no_link_preview())
                    .await?
            }
        };
        Ok(())
    }
}
