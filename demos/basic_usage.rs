//! Basic logger usage example
//!
//! Demonstrates which log calls reach the agent and what the agent receives.
//!
//! Run with: cargo run --example basic_usage

use newrelic_logger::prelude::*;
use newrelic_logger::{context, critical};

fn main() -> Result<()> {
    println!("=== New Relic Logger - Basic Usage Example ===\n");

    let agent = RecordingAgent::new();
    let logger = NewRelicLogger::new(&agent);

    println!("1. Logging at different levels:");
    logger.debug("cache warmed", &Context::new())?;
    logger.error("request failed, retrying", &Context::new())?;
    logger.critical("an error message", &context! { "foo" => "bar" })?;

    println!("\n2. Reporting a caught panic:");
    if let Err(fatal) = FatalError::catch(|| -> u32 { panic!("worker thread died") }) {
        let ctx = Context::new()
            .with("worker", 4_i64)
            .with("job", serde_json::json!({ "id": 991, "queue": "mail" }))
            .with_exception(fatal);
        logger.emergency("worker crashed", &ctx)?;
    }

    println!("\n3. Using the macros:");
    critical!(logger, context! { "mount" => "/var" }; "disk {}% full", 97)?;

    println!("\n4. Calls received by the agent:");
    for call in agent.calls() {
        match call {
            AgentCall::CustomParameter { key, value } => println!("   param  {} = {}", key, value),
            AgentCall::NoticeError { message, exception } => match exception {
                Some(exception) => println!("   error  {} ({})", message, exception),
                None => println!("   error  {}", message),
            },
        }
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
