//! Session controller - account creation, login and the balance loop
//!
//! ```text
//! Startup ──1──▶ AccountCreation ──▶ Session(account) ──0──▶ Startup
//!    │ 2 (login ok) ─────────────────────▲
//!    └─0──▶ Terminated
//! ```
//!
//! On the first run (empty store) the startup menu is skipped and the
//! controller terminates once that first session ends.

use std::sync::Arc;

use crate::domain::money::format_balance;
use crate::domain::result::{Error, Result};
use crate::domain::{Account, ACCOUNT_NUMBER_DIGITS};
use crate::ports::{AccountStore, Console};
use crate::services::credentials::{make_pin_record, verify_pin};
use crate::services::logging::{LogEvent, LoggingService};
use crate::services::prompter::Prompter;

#[derive(Debug)]
enum State {
    Startup,
    AccountCreation,
    Session(Account),
    Terminated,
}

/// Drives the ATM dialog against an injected store and console
pub struct SessionController<C> {
    store: Arc<dyn AccountStore>,
    prompter: Prompter<C>,
    logger: Option<Arc<LoggingService>>,
}

impl<C: Console> SessionController<C> {
    pub fn new(store: Arc<dyn AccountStore>, console: C) -> Self {
        Self {
            store,
            prompter: Prompter::new(console),
            logger: None,
        }
    }

    /// Attach an event log
    pub fn with_logger(mut self, logger: Arc<LoggingService>) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn prompter(&self) -> &Prompter<C> {
        &self.prompter
    }

    pub fn into_console(self) -> C {
        self.prompter.into_console()
    }

    /// Log an event, ignoring any errors (logging should never break the app)
    fn log(&self, event: LogEvent) {
        if let Some(logger) = &self.logger {
            let _ = logger.log(event);
        }
    }

    /// Run the dialog until the user quits
    pub fn run(&mut self) -> Result<()> {
        self.prompter.show_title()?;
        self.log(LogEvent::new("session_started"));

        let first_run = !self.store.has_any_accounts()?;
        let mut state = if first_run {
            self.prompter
                .info("Looks like this is the first run: there are no accounts yet.")?;
            self.prompter.pause()?;
            State::AccountCreation
        } else {
            State::Startup
        };

        loop {
            state = match state {
                State::Startup => match self.prompter.menu_startup()?.as_str() {
                    "1" => State::AccountCreation,
                    "2" => match self.login()? {
                        Some(account) => State::Session(account),
                        None => State::Startup,
                    },
                    "0" => State::Terminated,
                    _ => {
                        self.prompter.error("Unknown menu item.")?;
                        State::Startup
                    }
                },
                State::AccountCreation => State::Session(self.create_account()?),
                State::Session(account) => {
                    self.session(account)?;
                    if first_run {
                        State::Terminated
                    } else {
                        State::Startup
                    }
                }
                State::Terminated => {
                    self.log(LogEvent::new("session_closed"));
                    self.prompter.info("Goodbye!")?;
                    return Ok(());
                }
            };
        }
    }

    /// Collect customer details and credentials, persist the new account and
    /// take an optional first deposit
    pub fn create_account(&mut self) -> Result<Account> {
        self.prompter.info("")?;
        self.prompter.info("=== New account ===")?;

        let name = self.prompter.ask_text("Enter your first name", 1)?;
        let surname = self.prompter.ask_text("Enter your surname", 1)?;
        let id_number = self
            .prompter
            .ask_text("Enter your ID (digits and letters allowed)", 1)?;

        let account_number = self.store.generate_unique_account_number()?;

        let pin = self.prompter.ask_pin_create()?;
        let record = make_pin_record(&pin);

        let mut account = Account::new(
            account_number,
            name,
            surname,
            id_number,
            record.salt_hex,
            record.hash_hex,
        );
        account.validate().map_err(Error::validation)?;
        self.store.upsert_account(&account)?;
        self.log(LogEvent::new("account_created").with_command("create_account"));
        self.prompter.show_account_created(&account.account_number)?;

        let deposit = self
            .prompter
            .ask_amount("Deposit an amount (for example 100 or 100.50)")?;
        if deposit > 0 {
            self.apply_deposit(&mut account, deposit)?;
        } else {
            self.prompter.info("Amount 0 - skipping the deposit.")?;
            self.prompter.show_balance(account.balance_cents)?;
        }

        Ok(account)
    }

    /// Ask for an account number and PIN; `None` when either does not check out
    pub fn login(&mut self) -> Result<Option<Account>> {
        self.prompter.info("")?;
        self.prompter.info("=== Log in ===")?;

        let number = self.prompter.ask_digits(
            "Enter your account number",
            ACCOUNT_NUMBER_DIGITS,
            Some(ACCOUNT_NUMBER_DIGITS),
        )?;
        let Some(account) = self.store.get_account(&number)? else {
            self.log(
                LogEvent::new("login_failed")
                    .with_command("login")
                    .with_error("Account not found"),
            );
            self.prompter.error("Account not found.")?;
            return Ok(None);
        };

        let pin = self.prompter.ask_pin_login()?;
        if !verify_pin(&pin, &account.pin_salt_hex, &account.pin_hash_hex)? {
            self.log(
                LogEvent::new("login_failed")
                    .with_command("login")
                    .with_error("Incorrect PIN"),
            );
            self.prompter.error("Incorrect PIN.")?;
            return Ok(None);
        }

        self.log(LogEvent::new("login_succeeded").with_command("login"));
        self.prompter.info(&format!(
            "Logged in. Welcome, {} {}!",
            account.name, account.surname
        ))?;
        self.prompter.show_balance(account.balance_cents)?;
        Ok(Some(account))
    }

    /// Deposit / withdraw / balance loop for a bound account
    pub fn session(&mut self, mut account: Account) -> Result<()> {
        loop {
            match self.prompter.menu_session()?.as_str() {
                "1" => {
                    let amount = self.prompter.ask_amount("How much to deposit?")?;
                    if amount == 0 {
                        self.prompter
                            .error("The deposit amount must be greater than 0.")?;
                        continue;
                    }
                    self.apply_deposit(&mut account, amount)?;
                }
                "2" => {
                    let amount = self.prompter.ask_amount("How much to withdraw?")?;
                    if amount == 0 {
                        self.prompter
                            .error("The withdrawal amount must be greater than 0.")?;
                        continue;
                    }
                    self.apply_withdrawal(&mut account, amount)?;
                }
                "3" => self.prompter.show_balance(account.balance_cents)?,
                "0" => {
                    self.prompter.info("Returning to the main menu.")?;
                    return Ok(());
                }
                _ => self.prompter.error("Unknown menu item.")?,
            }
        }
    }

    fn apply_deposit(&mut self, account: &mut Account, amount: u64) -> Result<()> {
        match account.deposit(amount) {
            Ok(_) => {}
            Err(Error::Overflow) => {
                self.prompter.error("The balance cannot hold that amount.")?;
                return Ok(());
            }
            Err(e) => return Err(e),
        }
        self.store.upsert_account(account)?;
        self.log(LogEvent::new("deposit_completed").with_command("deposit"));
        self.prompter
            .info(&format!("Deposited: {}", format_balance(amount)))?;
        self.prompter.show_balance(account.balance_cents)
    }

    fn apply_withdrawal(&mut self, account: &mut Account, amount: u64) -> Result<()> {
        match account.withdraw(amount) {
            Ok(_) => {}
            Err(Error::InsufficientFunds { balance_cents, .. }) => {
                self.log(
                    LogEvent::new("withdraw_rejected")
                        .with_command("withdraw")
                        .with_error("Insufficient funds"),
                );
                self.prompter.error("Insufficient funds.")?;
                return self.prompter.show_balance(balance_cents);
            }
            Err(e) => return Err(e),
        }
        self.store.upsert_account(account)?;
        self.log(LogEvent::new("withdraw_completed").with_command("withdraw"));
        self.prompter
            .info(&format!("Dispensed: {}", format_balance(amount)))?;
        self.prompter.show_balance(account.balance_cents)
    }
}
