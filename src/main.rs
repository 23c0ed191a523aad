mod app;

use anyhow::Context;
use clap::Parser;
use std::io::{BufRead, Write};
use std::sync::Arc;
use winit::event_loop::EventLoop;

use app::{App, AppEvent};
use aura_studio::chat::{ChatSession, CompletionService, GeminiClient, GREETING};
use aura_studio::cli::{Cli, Command, ShowArgs};
use aura_studio::config::ChatConfig;
use aura_studio::site::{self, ContactFields, ContactForm, FormStatus, Route};

/// Tick used to drive the simulated contact submission
const CONTACT_TICK_SECS: f32 = 0.1;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command() {
        Command::Show(args) => run_show(args),
        Command::Chat => run_chat(),
        Command::Projects { category } => run_projects(category),
        Command::Routes => {
            for route in Route::ALL {
                println!("{}", route);
            }
            Ok(())
        }
        Command::Contact { name, email, message } => run_contact(ContactFields { name, email, message }),
    }
}

fn chat_service() -> anyhow::Result<Arc<dyn CompletionService>> {
    let config = ChatConfig::from_env()?;
    let client = GeminiClient::new(config)?;
    log::info!("Chat model: {}", client.model());
    Ok(Arc::new(client))
}

fn run_show(args: ShowArgs) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    let service = match chat_service() {
        Ok(service) => Some(service),
        Err(e) => {
            log::warn!("Chat disabled: {}", e);
            None
        }
    };

    let event_loop = EventLoop::<AppEvent>::with_user_event().build()?;
    let mut app = App::new(args, service, runtime.handle().clone(), event_loop.create_proxy());

    println!("Aura Studio - Controls: mouse to steer, 1/2/3 switch scene, Tab chat, Escape to quit");
    event_loop.run_app(&mut app)?;

    Ok(())
}

fn run_chat() -> anyhow::Result<()> {
    let service = chat_service().context("chat needs GEMINI_API_KEY (or API_KEY)")?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    let mut session = ChatSession::with_greeting();
    println!("AIOOOKI: {}", GREETING);

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("   you: ");
        std::io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let ran = runtime.block_on(session.submit(line.trim_end_matches(['\r', '\n']), service.as_ref()));
        if !ran {
            continue;
        }
        if let Some(reply) = session.messages().last() {
            println!("AIOOOKI: {}", reply.text);
        }
    }

    Ok(())
}

fn run_projects(category: Option<site::Category>) -> anyhow::Result<()> {
    let projects: Vec<&site::Project> = match category {
        Some(category) => site::catalogue(category).iter().collect(),
        None => site::all_projects().collect(),
    };
    println!("{}", serde_json::to_string_pretty(&projects)?);
    Ok(())
}

fn run_contact(fields: ContactFields) -> anyhow::Result<()> {
    let mut form = ContactForm::new();
    form.fields = fields;
    form.submit()?;

    println!("Sending...");
    while form.status() == FormStatus::Submitting {
        std::thread::sleep(std::time::Duration::from_secs_f32(CONTACT_TICK_SECS));
        form.tick(CONTACT_TICK_SECS);
    }

    let when = form.sent_at().map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()).unwrap_or_default();
    println!("Message sent ({}). We will be in touch shortly.", when);
    Ok(())
}
