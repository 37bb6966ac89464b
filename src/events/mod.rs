pub mod location;

use std::sync::Arc;

use teloxide::dispatching::{HandlerExt, MessageFilterExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;

use crate::commands::{self, Command};
use crate::{Data, Error};

/// Update routing: commands first, then location messages, then any other
/// message that answers a pending `/lookup` prompt (told it is not a location).
pub fn schema() -> UpdateHandler<Error> {
    Update::filter_message()
        .branch(dptree::entry().filter_command::<Command>().endpoint(commands::answer))
        .branch(Message::filter_location().endpoint(location::endpoint))
        .branch(dptree::filter(answers_pending_prompt).endpoint(location::endpoint))
}

fn answers_pending_prompt(msg: Message, data: Arc<Data>) -> bool {
    location::LocationMessage::from_message(&msg)
        .replied_to
        .is_some_and(|key| data.pending_radii.get(&key).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::json;
    use teloxide::types::MessageId;

    use crate::mask::MaskApi;
    use crate::pending::{PendingRadii, PromptKey};

    fn data() -> Arc<Data> {
        Arc::new(Data {
            pending_radii: PendingRadii::new(Duration::from_secs(60)),
            mask_api: MaskApi::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap(),
        })
    }

    /// A text message in chat 42 replying to the bot's message 10.
    fn text_reply() -> Message {
        serde_json::from_value(json!({
            "message_id": 11,
            "date": 1583996400,
            "chat": {"id": 42, "type": "private", "first_name": "Kim"},
            "from": {"id": 7, "is_bot": false, "first_name": "Kim"},
            "reply_to_message": {
                "message_id": 10,
                "date": 1583996300,
                "chat": {"id": 42, "type": "private", "first_name": "Kim"},
                "from": {"id": 99, "is_bot": true, "first_name": "MaskBot", "username": "mask_bot"},
                "text": "위치를 보내주세요"
            },
            "text": "강남역"
        }))
        .unwrap()
    }

    fn plain_text() -> Message {
        serde_json::from_value(json!({
            "message_id": 12,
            "date": 1583996400,
            "chat": {"id": 42, "type": "private", "first_name": "Kim"},
            "from": {"id": 7, "is_bot": false, "first_name": "Kim"},
            "text": "안녕"
        }))
        .unwrap()
    }

    #[test]
    fn test_reply_to_pending_prompt_is_routed() {
        let data = data();
        data.pending_radii.insert(PromptKey::new(MessageId(10), ChatId(42)), 1000);
        assert!(answers_pending_prompt(text_reply(), data));
    }

    #[test]
    fn test_reply_needs_exact_prompt_and_chat() {
        let data = data();
        assert!(!answers_pending_prompt(text_reply(), data.clone()));

        data.pending_radii.insert(PromptKey::new(MessageId(10), ChatId(43)), 1000);
        assert!(!answers_pending_prompt(text_reply(), data.clone()));

        data.pending_radii.insert(PromptKey::new(MessageId(9), ChatId(42)), 1000);
        assert!(!answers_pending_prompt(text_reply(), data));
    }

    #[test]
    fn test_message_without_reply_is_not_routed() {
        let data = data();
        data.pending_radii.insert(PromptKey::new(MessageId(10), ChatId(42)), 1000);
        assert!(!answers_pending_prompt(plain_text(), data));
    }
}
