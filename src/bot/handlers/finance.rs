//! `/finance income|expense|balance`

use crate::bot::context::BotContext;
use crate::bot::error::CommandError;
use crate::bot::ledger::parse_amount;
use crate::bot::router::{CommandHandler, Event};

/// Reply for a bad income amount
pub const INVALID_INCOME: &str = "Please provide a valid income amount.";
/// Reply for a bad expense amount
pub const INVALID_EXPENSE: &str = "Please provide a valid expense amount.";
/// Usage line for unknown sub-commands
pub const FINANCE_USAGE: &str =
    "Use /finance income <amount>, /finance expense <amount>, or /finance balance.";

/// Logs income and expenses in the shared ledger
pub struct FinanceCommand;

#[async_trait::async_trait]
impl CommandHandler for FinanceCommand {
    async fn handle(&self, ctx: &BotContext, event: &Event) -> Result<String, CommandError> {
        let args: Vec<String> = event.args().iter().map(|a| a.to_lowercase()).collect();
        let amount_token = args.get(1).map(String::as_str);

        match args.first().map(String::as_str) {
            Some("income") => {
                let amount = parse_amount(amount_token, INVALID_INCOME)?;
                let total = ctx.ledger.log_income(amount).await?;
                Ok(format!("Income of {amount} added. Total income: {total}"))
            }
            Some("expense") => {
                let amount = parse_amount(amount_token, INVALID_EXPENSE)?;
                let total = ctx.ledger.log_expense(amount).await?;
                Ok(format!("Expense of {amount} added. Total expenses: {total}"))
            }
            Some("balance") if args.len() == 1 => {
                let balance = ctx.ledger.balance().await;
                Ok(format!("Your balance is: {balance}"))
            }
            _ => Ok(FINANCE_USAGE.to_string()),
        }
    }
}
