//! Simple walkthrough of the command registry.
//!
//! Run with: cargo run --example math_plugin
//!
//! Steps:
//! 1. Register a single command with metadata
//! 2. Install a plugin under the `math` namespace
//! 3. Execute commands, including an unknown one and a failing one
//! 4. Print the generated help

use lumo_registry::{args, CommandArgs, CommandMetadata, CommandRegistry, HandlerResult, PluginCommand};
use serde_json::json;

async fn add(args: CommandArgs) -> HandlerResult {
    Ok(json!(args.get_f64(0)? + args.get_f64(1)?))
}

async fn divide(args: CommandArgs) -> HandlerResult {
    let divisor = args.get_f64(1)?;
    if divisor == 0.0 {
        return Err("division by zero".into());
    }
    Ok(json!(args.get_f64(0)? / divisor))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Lumo Registry Demo ===\n");

    let registry = CommandRegistry::new();

    // Step 1: single command
    registry.register(
        "calculate",
        add,
        Some(
            CommandMetadata::new()
                .with_description("Add two numbers")
                .with_usage("calculate <a> <b>")
                .with_example("calculate 5 3"),
        ),
    );

    // Step 2: plugin
    registry.plugin(
        "math",
        vec![
            ("add", PluginCommand::new(add)),
            (
                "divide",
                PluginCommand::new(divide)
                    .with_metadata(CommandMetadata::new().with_description("Divide a by b")),
            ),
            (
                "negate",
                PluginCommand::sync(|args| Ok(json!(-args.get_f64(0)?))),
            ),
        ],
    );

    // Step 3: execution
    println!("calculate 5 3 = {}", registry.execute("calculate", args![5, 3]).await?);
    println!("math:negate 4 = {}", registry.execute("math:negate", args![4]).await?);

    match registry.execute("math:divide", args![1, 0]).await {
        Ok(value) => println!("math:divide 1 0 = {}", value),
        Err(e) => println!("math:divide 1 0 failed: {}", e),
    }
    match registry.execute("ghost", args![]).await {
        Ok(value) => println!("ghost = {}", value),
        Err(e) => println!("ghost failed: {}", e),
    }

    // Step 4: help
    println!("\n{}\n", registry.help(None));
    println!("{}", registry.help(Some("calculate")));

    Ok(())
}
