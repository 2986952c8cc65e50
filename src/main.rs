//! Chatsplit - 命令行演示
//!
//! 从标准输入读取一条消息，分段后写入日志，最后一段以 JSON 输出
//!
//! 用法:
//! - `chatsplit [conversation_id]` 把标准输入视为纯文本
//! - `chatsplit --json [conversation_id]` 标准输入为 ContentUnit 数组

use std::io::Read;
use std::sync::Arc;

use chatsplit::application::ports::ConversationStorePort;
use chatsplit::config::{load_config, print_config};
use chatsplit::infrastructure::{InMemoryConversationStore, LogTransport};
use chatsplit::{ContentUnit, MessageSplitter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!("{},chatsplit={}", config.log.level, config.log.level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(env_filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    print_config(&config);

    let mut args = std::env::args().skip(1).peekable();
    let json_input = args.next_if(|a| a == "--json").is_some();
    let conversation_id = args.next().unwrap_or_else(|| "console".to_string());

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let mut chain: Vec<ContentUnit> = if json_input {
        serde_json::from_str(&input)?
    } else {
        vec![ContentUnit::Plain(input.trim_end_matches('\n').to_string())]
    };

    let store = InMemoryConversationStore::new();
    let splitter = MessageSplitter::from_config(&config.split, Arc::new(LogTransport::new()));

    let report = splitter.dispatch(&conversation_id, &mut chain).await;
    if report.was_split() {
        tracing::info!(
            segments = report.total_segments,
            sent = report.sent_count(),
            failed = report.failed_count(),
            "Message split"
        );
    }

    // 记录已发送的分段，供后续对话参考
    store.with_state(&conversation_id, &mut |state| {
        for outcome in report.sent() {
            state.record_bot_message(outcome.text.clone());
        }
    });
    tracing::debug!(
        conversation_id = %conversation_id,
        cached = store.get_or_create(&conversation_id).bot_messages().count(),
        "Conversation state updated"
    );

    println!("{}", serde_json::to_string_pretty(&chain)?);

    Ok(())
}
