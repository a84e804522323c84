//! Exercise every registered tool against the live services.
//!
//! Run with: cargo run -p research-tools --example demo_tools
//!
//! Google search is only included when GOOGLE_SEARCH_JSON_API_KEY and
//! GOOGLE_CSE_ID are set (a `.env` file works too).

use research_tools::{assemble_tools_from_env, ToolRegistry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("research_tools=debug".parse()?),
        )
        .init();

    println!("=== Research Tools Demo ===\n");

    let registry = assemble_tools_from_env();

    println!("Registered tools:");
    for (name, desc) in registry.get_descriptions() {
        println!("  - {}: {}", name, desc);
    }
    println!();

    let calls = [
        ("google_search", r#"{"query": "rust programming language", "num": 3}"#),
        ("fetch_url", r#"{"url": "https://example.com", "max_chars": 500}"#),
        ("wikipedia", r#"{"topic": "Ada Lovelace", "sentences": 2}"#),
        ("arxiv_search", r#"{"query": "attention is all you need", "max_results": 2}"#),
    ];

    for (tool, args) in calls {
        run(&registry, tool, args).await;
    }

    // Error shapes
    run(&registry, "wikipedia", r#"{"topic": "No Such Article Xq9z"}"#).await;
    run(&registry, "fetch_url", r#"{"url": "not-a-url"}"#).await;

    println!("=== Done ===");
    Ok(())
}

async fn run(registry: &ToolRegistry, tool: &str, args: &str) {
    println!("--- {} {} ---", tool, args);

    if !registry.has_tool(tool) {
        println!("  [SKIP] not registered\n");
        return;
    }

    match registry.execute_json(tool, args).await {
        Ok(output) => {
            let status = if output.success { "OK" } else { "ERROR SHAPE" };
            println!("  [{}]\n{}\n", status, output.content);
        }
        Err(e) => println!("  [FAIL] {}\n", e),
    }
}
