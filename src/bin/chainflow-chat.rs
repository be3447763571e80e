// Chainflow chat - interactive multi-agent analysis console

use chainflow::agents::{Agent, PlannerAgent, SpecialistAgent};
use chainflow::llm::{OllamaChat, OllamaConfig};
use chainflow::workflow::Orchestrator;
use std::io::{self, Write};
use std::sync::Arc;
use termimad::{MadSkin, crossterm::style::Color};

fn create_markdown_skin() -> MadSkin {
    let mut skin = MadSkin::default();

    // Headers
    skin.headers[0].set_fg(Color::Cyan);
    skin.headers[1].set_fg(Color::Blue);
    skin.headers[2].set_fg(Color::Green);

    // Code blocks
    skin.code_block.set_fg(Color::Yellow);
    skin.inline_code.set_fg(Color::Yellow);

    // Bold and italic
    skin.bold.set_fg(Color::White);
    skin.italic.set_fg(Color::Magenta);

    skin
}

fn print_agent_roster(llm: Arc<OllamaChat>) {
    let agents: Vec<Box<dyn Agent>> = vec![
        Box::new(PlannerAgent::new(llm.clone())),
        Box::new(SpecialistAgent::supply_chain(llm.clone())),
        Box::new(SpecialistAgent::financial(llm)),
    ];

    println!("\nAvailable agents:");
    for agent in &agents {
        println!("  • {}", agent.name());
        println!("    Capabilities: {}", agent.capabilities().join(", "));
        for example in agent.example_queries() {
            println!("    e.g. \"{}\"", example);
        }
    }
    println!();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Chainflow v{} - Multi-Agent Analysis\n", env!("CARGO_PKG_VERSION"));

    let config = OllamaConfig::from_env();
    println!("Model: {}", config.model);
    println!("Endpoint: {}\n", config.endpoint);

    let llm = Arc::new(OllamaChat::with_config(config));
    let mut orchestrator = Orchestrator::new(llm.clone());

    let skin = create_markdown_skin();
    println!("Commands: /route <query>, /agents, /clear, exit\n");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() || input == "exit" || input == "quit" {
            break;
        }

        if let Some(query) = input.strip_prefix("/route ") {
            let preview = orchestrator.get_routing_decision(query.trim()).await;
            println!("\nPrimary agent: {}", preview.primary_agent);
            println!("Collaboration: {}", preview.requires_collaboration);
            println!("Execution order: {}\n", preview.execution_order.join(" -> "));
            continue;
        }

        match input {
            "/agents" => {
                print_agent_roster(llm.clone());
                continue;
            }
            "/clear" => {
                orchestrator = Orchestrator::new(llm.clone());
                println!("Sessions cleared.\n");
                continue;
            }
            _ => {}
        }

        let response = orchestrator.process_query(input).await;

        println!(); // Empty line before response
        skin.print_text(&response);
        println!(); // Empty line after response
    }

    println!("Goodbye!");
    Ok(())
}
