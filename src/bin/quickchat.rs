//! QuickChat driver
//!
//! A line-oriented terminal front end: registration, login, and the menu
//! loop over the message store. All rendering lives here.

use anyhow::Result;
use clap::Parser;
use quickchat::{
    account::Account,
    compose::{Classification, MessageDraft, SessionQuota},
    storage::{settings::DEFAULT_SETTINGS_FILE, MessageRecord, MessageStore, Settings},
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quickchat", version, about = "Compose, store and search short messages")]
struct Cli {
    /// Settings file
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Data file for sent and stored messages (overrides the settings)
    #[arg(long)]
    data_file: Option<String>,
}

/// Prompts on stdout and reads answers from stdin
///
/// Every read returns `None` at end of input, which the menus treat as cancel.
struct Prompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{} ", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask until the answer passes `check`; `None` on end of input
    fn ask_until(
        &mut self,
        prompt: &str,
        complaint: &str,
        check: impl Fn(&str) -> bool,
    ) -> io::Result<Option<String>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            if check(&answer) {
                return Ok(Some(answer));
            }
            self.say(complaint)?;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    quickchat::init();

    let mut settings = Settings::load(&cli.settings)?;
    if let Some(data_file) = cli.data_file {
        settings.data_file = data_file;
    }

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let Some(account) = register(&mut prompter)? else {
        prompter.say("Cannot proceed to login due to registration failure.")?;
        return Ok(());
    };

    if !login(&mut prompter, &account)? {
        prompter.say("Cannot proceed to QuickChat due to login failure.")?;
        return Ok(());
    }

    let mut store = MessageStore::from_settings(&settings);
    main_menu(&mut prompter, &mut store, &settings)?;
    Ok(())
}

fn register<R: BufRead, W: Write>(p: &mut Prompter<R, W>) -> Result<Option<Account>> {
    p.say("=== Registration ===")?;

    let mut fields = Vec::with_capacity(5);
    for prompt in [
        "First name:",
        "Last name:",
        "Username (must contain '_' and be at most 5 characters):",
        "Password:",
        "Cell number (+27XXXXXXXXX or 0XXXXXXXXX):",
    ] {
        let Some(answer) = p.ask(prompt)? else {
            return Ok(None);
        };
        fields.push(answer.trim().to_string());
    }

    let mut fields = fields.into_iter();
    let mut next = || fields.next().unwrap_or_default();
    let account = Account::new(next(), next(), next(), next(), next());

    match account.register() {
        Ok(()) => {
            p.say("Registration successful!")?;
            Ok(Some(account))
        }
        Err(e) => {
            p.say(&e.to_string())?;
            Ok(None)
        }
    }
}

fn login<R: BufRead, W: Write>(p: &mut Prompter<R, W>, account: &Account) -> Result<bool> {
    p.say("=== Login ===")?;
    let Some(username) = p.ask("Username:")? else {
        return Ok(false);
    };
    let Some(password) = p.ask("Password:")? else {
        return Ok(false);
    };

    let success = account.login(username.trim(), &password);
    p.say(&account.login_status(success))?;
    Ok(success)
}

fn main_menu<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    store: &mut MessageStore,
    settings: &Settings,
) -> Result<()> {
    p.say("Welcome to the QuickChat Application!")?;

    loop {
        p.say(
            "\n--- Main Menu ---\n\
             1. QuickChat Messaging\n\
             2. Display Senders and Recipients\n\
             3. Display Longest Message\n\
             4. Search Message by ID\n\
             5. Search Messages by Recipient\n\
             6. Delete Message by Hash\n\
             7. Display Full Message Report\n\
             8. Load Messages from JSON File\n\
             9. Logout/Exit",
        )?;
        let Some(choice) = p.ask("Choose an option:")? else {
            p.say("Exiting application. Goodbye!")?;
            return Ok(());
        };

        match choice.trim() {
            "1" => quickchat_session(p, store, settings)?,
            "2" => show_senders_and_recipients(p, store)?,
            "3" => show_longest(p, store)?,
            "4" => {
                if let Some(id) = ask_non_empty(p, "Enter Message ID to search:")? {
                    match store.find_by_id(&id) {
                        Some(msg) => p.say(&format!(
                            "--- Message Details (ID: {}) ---\nRecipient: {}\nMessage: {}\nHash: {}\nStatus: {}",
                            id, msg.recipient, msg.text, msg.token, msg.status
                        ))?,
                        None => p.say(&format!("Message with ID '{}' not found.", id))?,
                    }
                }
            }
            "5" => {
                if let Some(recipient) = ask_non_empty(p, "Enter Recipient number to search:")? {
                    let found = store.find_by_recipient(&recipient);
                    if found.is_empty() {
                        p.say(&format!("No messages found for recipient '{}'.", recipient))?;
                    } else {
                        p.say(&format!("--- Messages to Recipient: {} ---", recipient))?;
                        for msg in found {
                            p.say(&format!(
                                "ID: {}, Message: '{}', Status: {}",
                                msg.id, msg.text, msg.status
                            ))?;
                        }
                    }
                }
            }
            "6" => {
                if let Some(token) = ask_non_empty(p, "Enter Message Hash to delete:")? {
                    match store.delete_by_token(&token) {
                        Ok(true) => p.say(&format!("Message with hash '{}' deleted.", token))?,
                        Ok(false) => p.say(&format!("Message with hash '{}' not found.", token))?,
                        Err(e) => p.say(&format!("Message removed, but saving failed: {}", e))?,
                    }
                }
            }
            "7" => show_report(p, store)?,
            "8" => match store.load() {
                Ok(true) => p.say("Messages loaded from JSON file.")?,
                Ok(false) => p.say("No messages to load or the JSON file is empty.")?,
                Err(e) => p.say(&format!("Error loading messages from JSON file: {}", e))?,
            },
            "9" => {
                p.say("Logging out. Goodbye!")?;
                return Ok(());
            }
            _ => p.say("Invalid option. Please choose a number between 1 and 9.")?,
        }
    }
}

fn ask_non_empty<R: BufRead, W: Write>(p: &mut Prompter<R, W>, prompt: &str) -> Result<Option<String>> {
    match p.ask(prompt)? {
        Some(answer) if !answer.trim().is_empty() => Ok(Some(answer.trim().to_string())),
        _ => {
            p.say("Nothing entered.")?;
            Ok(None)
        }
    }
}

fn quickchat_session<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    store: &mut MessageStore,
    settings: &Settings,
) -> Result<()> {
    p.say("Welcome to QuickChat Messaging!")?;
    let mut quota = SessionQuota::new(settings.default_message_limit);

    if settings.load_on_start {
        if let Err(e) = store.load() {
            p.say(&format!("Error loading messages from JSON file: {}", e))?;
        }
    }

    loop {
        p.say(
            "\n--- QuickChat Menu ---\n\
             1. Send a new message\n\
             2. Show recently sent/stored/disregarded messages\n\
             3. Go back to main application menu",
        )?;
        let Some(choice) = p.ask("Choose an option (1-3):")? else {
            p.say("Returning to Main Menu.")?;
            return Ok(());
        };

        match choice.trim() {
            "1" => {
                if quota.is_exhausted() {
                    p.say(&format!(
                        "Reached the limit of {} message(s). You cannot send more messages in this QuickChat session.",
                        quota.allowed()
                    ))?;
                    return Ok(());
                }
                if !quota.has_limit() && !choose_limit(p, &mut quota)? {
                    continue;
                }
                while !quota.is_exhausted() {
                    if !compose_one(p, store, quota.next_seq())? {
                        quota.reset();
                        break;
                    }
                    quota.record()?;
                }
            }
            "2" => show_all(p, store)?,
            "3" => return Ok(()),
            _ => p.say("Invalid option. Please choose 1, 2 or 3.")?,
        }
    }
}

fn choose_limit<R: BufRead, W: Write>(p: &mut Prompter<R, W>, quota: &mut SessionQuota) -> Result<bool> {
    let Some(answer) = p.ask("How many messages do you wish to send?")? else {
        return Ok(false);
    };
    let Ok(limit) = answer.trim().parse::<u32>() else {
        p.say("Invalid input. Please enter a number.")?;
        return Ok(false);
    };
    if let Err(e) = quota.set_limit(limit) {
        p.say(&e.to_string())?;
        return Ok(false);
    }
    Ok(true)
}

/// Compose and classify one message; false if the user cancelled
fn compose_one<R: BufRead, W: Write>(p: &mut Prompter<R, W>, store: &mut MessageStore, seq: u32) -> Result<bool> {
    p.say(&format!("--- Message {} ---", seq))?;

    let Some(sender) = p.ask_until("Your name (sender):", "Sender name cannot be empty.", |s| {
        quickchat::storage::valid_sender(s)
    })?
    else {
        return Ok(false);
    };
    let Some(recipient) = p.ask_until(
        "Recipient number (e.g. +27831234567):",
        "Invalid recipient number. Use '+' followed by 10 to 15 digits.",
        |s| quickchat::storage::valid_recipient(Some(s.trim())),
    )?
    else {
        return Ok(false);
    };

    let record: MessageRecord = loop {
        let Some(text) = p.ask("Message (max 250 characters):")? else {
            return Ok(false);
        };
        let draft = MessageDraft::new(sender.clone(), recipient.trim().to_string(), text);
        match draft.into_record(seq, &mut rand::thread_rng()) {
            Ok(record) => break record,
            Err(e) => p.say(&e.to_string())?,
        }
    };

    p.say("Choose an action for this message:\n1. Send Message Now\n2. Discard Message\n3. Store Message for Later")?;
    let Some(action) = p.ask("Your choice (1-3):")? else {
        return Ok(false);
    };
    let Ok(classification) = action.parse::<Classification>() else {
        p.say("Invalid choice. Message cancelled.")?;
        return Ok(false);
    };

    let summary = format!(
        "Message ID: {}\nMessage Hash: {}\nRecipient: {}\nMessage: {}\nStatus: {}",
        record.id,
        record.token,
        record.recipient,
        record.text,
        classification.status()
    );
    if let Err(e) = classification.apply(store, record) {
        p.say(&format!("Error saving messages to JSON: {}", e))?;
    }
    p.say(&summary)?;
    Ok(true)
}

fn show_all<R: BufRead, W: Write>(p: &mut Prompter<R, W>, store: &MessageStore) -> Result<()> {
    p.say("--- All Messages ---")?;
    let sections: [(&str, Vec<&MessageRecord>); 3] = [
        ("Sent", store.sent()),
        ("Stored", store.stored()),
        ("Disregarded", store.disregarded().iter().collect()),
    ];
    for (name, messages) in sections {
        p.say(&format!("==== {} Messages ====", name))?;
        if messages.is_empty() {
            p.say(&format!("No {} messages.", name.to_lowercase()))?;
        }
        for msg in messages {
            p.say(&msg.to_string())?;
        }
    }
    Ok(())
}

fn show_senders_and_recipients<R: BufRead, W: Write>(p: &mut Prompter<R, W>, store: &MessageStore) -> Result<()> {
    let pairs = store.sent_sender_recipient_pairs();
    if pairs.is_empty() {
        p.say("No sent messages to display.")?;
        return Ok(());
    }
    p.say("--- Sent Messages ---")?;
    for pair in pairs {
        p.say(&format!(
            "Sender: {}, Recipient: {}, Message ID: {}",
            pair.sender, pair.recipient, pair.id
        ))?;
    }
    Ok(())
}

fn show_longest<R: BufRead, W: Write>(p: &mut Prompter<R, W>, store: &MessageStore) -> Result<()> {
    match store.longest_sent() {
        Some(msg) => p.say(&format!(
            "--- Longest Sent Message ---\nID: {}\nRecipient: {}\nMessage: {}\nLength: {} characters",
            msg.id,
            msg.recipient,
            msg.text,
            msg.text_len()
        ))?,
        None => p.say("No sent messages to analyze for longest message.")?,
    }
    Ok(())
}

fn show_report<R: BufRead, W: Write>(p: &mut Prompter<R, W>, store: &MessageStore) -> Result<()> {
    let report = store.all_sent_report();
    if report.is_empty() {
        p.say("No sent messages to generate a report for.")?;
        return Ok(());
    }
    p.say("--- Full Report: Sent Messages ---")?;
    for msg in report {
        p.say(&format!(
            "ID: {}\nSender: {}\nRecipient: {}\nMessage: {}\nHash: {}\nStatus: {}\n----------------------------------",
            msg.id, msg.sender, msg.recipient, msg.text, msg.token, msg.status
        ))?;
    }
    Ok(())
}
