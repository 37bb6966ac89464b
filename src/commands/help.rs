use teloxide::types::{ChatId, MessageId};

use crate::utils::{Messenger, Prompt};
use crate::Error;

pub const WELCOME: &str = "\
반갑습니다! 공적 마스크 위치를 알려주는 텔레그램 봇입니다. \
현재 위치를 보내면 근처 500미터 이내의 마스크 판매처와 재고를 알려드립니다.

/lookup [반경] — 반경(1~5000미터)을 지정해서 검색";

pub async fn send_welcome<M: Messenger + ?Sized>(
    messenger: &M,
    chat_id: ChatId,
    message_id: MessageId,
) -> Result<(), Error> {
    messenger
        .send_reply(chat_id, message_id, WELCOME, Prompt::None)
        .await?;
    Ok(())
}
