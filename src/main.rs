//! Stock Memo Terminal Shell
//!
//! Line-oriented stand-in for the mobile UI: renders snapshots as text and
//! turns commands into intents.

use std::sync::Arc;

use stock_memo_lib::config::APP_NAME;
use stock_memo_lib::domain::Entity;
use stock_memo_lib::{
    AppState, ChannelNotifier, Intent, Notification, RecordId, ReminderController,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

const HELP: &str = "\
Inventory:  items | add <name> | rm <id> | + <id> | - <id> | adj <id> <delta>
Memos:      memos | memo <text> | del <id> | yes | no
Settings:   remind on|off|toggle | settings
Other:      json | logs | help | quit
Lines starting with '{' are read as JSON intents.";

#[derive(Debug, PartialEq)]
enum Command {
    Apply(Intent),
    ShowItems,
    ShowMemos,
    ShowSettings,
    Json,
    Logs,
    Help,
    Quit,
}

fn parse_command(line: &str, app: &AppState) -> Result<Command, String> {
    let line = line.trim();
    if line.starts_with('{') {
        return serde_json::from_str(line)
            .map(Command::Apply)
            .map_err(|e| format!("Bad intent: {}", e));
    }

    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();
    let id = || -> Result<RecordId, String> {
        if rest.is_empty() {
            Err(format!("'{}' needs an id", word))
        } else {
            Ok(RecordId::from(rest))
        }
    };

    let command = match word {
        "items" | "ls" => Command::ShowItems,
        "memos" => Command::ShowMemos,
        "settings" => Command::ShowSettings,
        "json" => Command::Json,
        "logs" => Command::Logs,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "add" => Command::Apply(Intent::AddItem {
            name: rest.to_string(),
        }),
        "rm" => Command::Apply(Intent::RemoveItem { id: id()? }),
        "+" => Command::Apply(Intent::AdjustQuantity { id: id()?, delta: 1 }),
        "-" => Command::Apply(Intent::AdjustQuantity { id: id()?, delta: -1 }),
        "adj" => {
            let (target, delta) = rest
                .split_once(' ')
                .ok_or_else(|| "usage: adj <id> <delta>".to_string())?;
            let delta = delta
                .trim()
                .parse()
                .map_err(|_| format!("'{}' is not a number", delta.trim()))?;
            Command::Apply(Intent::AdjustQuantity {
                id: RecordId::from(target),
                delta,
            })
        }
        "memo" => Command::Apply(Intent::AddMemo {
            text: rest.to_string(),
        }),
        "del" => {
            let id = id()?;
            let text = app
                .memos
                .memos()
                .iter()
                .find(|m| m.id() == &id)
                .map(|m| m.text().to_string())
                .unwrap_or_default();
            Command::Apply(Intent::RequestMemoDelete { id, text })
        }
        "yes" => {
            let pending = app
                .memos
                .pending_delete()
                .ok_or_else(|| "Nothing to confirm".to_string())?;
            Command::Apply(Intent::ConfirmMemoDelete {
                id: pending.id.clone(),
            })
        }
        "no" => Command::Apply(Intent::CancelMemoDelete),
        "remind" => match rest {
            "on" => Command::Apply(Intent::SetReminder { enabled: true }),
            "off" => Command::Apply(Intent::SetReminder { enabled: false }),
            "toggle" | "" => Command::Apply(Intent::ToggleReminder),
            other => return Err(format!("remind: unknown option '{}'", other)),
        },
        "" => return Err(String::new()),
        other => return Err(format!("Unknown command '{}', try 'help'", other)),
    };
    Ok(command)
}

fn render_items(app: &AppState) {
    println!("-- Inventory --");
    for item in app.inventory.items() {
        println!("  [{}] {:<24} {}", item.id, item.name, item.quantity);
    }
}

fn render_memos(app: &AppState) {
    println!("-- Memos --");
    for memo in app.memos.memos() {
        println!("  [{}] • {}", memo.id(), memo.text());
    }
    if let Some(pending) = app.memos.pending_delete() {
        println!("{}: {}  (yes/no)", pending.title(), pending.message());
    }
}

fn render_settings(app: &AppState) {
    println!("-- Settings --");
    println!("  Hourly Reminders: [{}]", app.reminder.button_label());
}

fn render_notification(notification: &Notification) {
    println!("\n🔔 {}: {}", notification.title, notification.body);
}

#[tokio::main]
async fn main() {
    let log_dir = std::env::temp_dir().join("stock-memo");
    if let Err(e) = rolling_logger::init_logger(&log_dir, APP_NAME) {
        eprintln!("Logging disabled: {}", e);
    }
    eprintln!(
        "[{}] Stock Memo starting",
        chrono::Local::now().format("%H:%M:%S%.3f")
    );

    let (notifier, mut notifications) = ChannelNotifier::channel();
    let reminder = match ReminderController::try_current(Arc::new(notifier)) {
        Ok(reminder) => reminder,
        Err(e) => {
            let _ = rolling_logger::error(&format!("Reminder setup failed: {}", e));
            eprintln!("{}", e);
            return;
        }
    };
    let mut app = AppState::seeded(reminder);

    println!("{}", HELP);
    render_items(&app);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        log::error!("stdin: {}", e);
                        break;
                    }
                };
                if !handle_line(&line, &mut app) {
                    break;
                }
            }
            Some(notification) = notifications.recv() => render_notification(&notification),
        }
    }

    app.reminder.set_enabled(false);
    drain(&mut notifications);
    let _ = rolling_logger::info("Stock Memo shell closed");
}

/// Returns false when the shell should exit
fn handle_line(line: &str, app: &mut AppState) -> bool {
    match parse_command(line, app) {
        Ok(Command::Apply(intent)) => {
            let rerender: fn(&AppState) = match &intent {
                Intent::AddMemo { .. }
                | Intent::SetMemoDraft { .. }
                | Intent::SubmitMemoDraft
                | Intent::RequestMemoDelete { .. }
                | Intent::ConfirmMemoDelete { .. }
                | Intent::CancelMemoDelete => render_memos,
                Intent::SetReminder { .. } | Intent::ToggleReminder => render_settings,
                _ => render_items,
            };
            app.apply(intent);
            rerender(app);
        }
        Ok(Command::ShowItems) => render_items(app),
        Ok(Command::ShowMemos) => render_memos(app),
        Ok(Command::ShowSettings) => render_settings(app),
        Ok(Command::Json) => match app.snapshot().to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{}", e),
        },
        Ok(Command::Logs) => {
            for line in rolling_logger::recent_lines() {
                println!("{}", line);
            }
        }
        Ok(Command::Help) => println!("{}", HELP),
        Ok(Command::Quit) => return false,
        Err(msg) if msg.is_empty() => {}
        Err(msg) => eprintln!("{}", msg),
    }
    true
}

fn drain(notifications: &mut mpsc::UnboundedReceiver<Notification>) {
    while let Ok(notification) = notifications.try_recv() {
        render_notification(&notification);
    }
}
