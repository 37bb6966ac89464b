pub mod help;
pub mod lookup;

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

use crate::{Data, Error};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "사용 가능한 명령어:")]
pub enum Command {
    #[command(description = "봇 소개")]
    Start,
    #[command(description = "도움말")]
    Help,
    #[command(description = "반경을 지정해서 마스크 판매처 검색 (예: /lookup 1000)")]
    Lookup(String),
}

pub async fn answer(bot: Bot, msg: Message, cmd: Command, data: Arc<Data>) -> Result<(), Error> {
    tracing::info!("명령 수신: {:?} (chat={})", cmd, msg.chat.id.0);
    match cmd {
        Command::Start | Command::Help => help::send_welcome(&bot, msg.chat.id, msg.id).await?,
        Command::Lookup(args) => {
            lookup::handle_radius_command(&bot, &data.pending_radii, msg.chat.id, msg.id, &args)
                .await?;
        }
    }
    Ok(())
}
