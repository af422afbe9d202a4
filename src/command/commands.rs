//! Executable commands
//!
//! Each `Command` variant carries the raw argument parts it was parsed with.
//! `execute` reads its flags, checks that referenced ids exist, mutates or
//! queries the lists in the `LendingContext`, and reports through the `Ui`.
//!
//! A command reads and writes the lists within a single `execute` call, and
//! performs every check before its first mutation, so a failed command leaves
//! the lists as they were.

use crate::command::parser::{self, Flags};
use crate::core::{LendingContext, TransactionList};
use crate::io::console::Ui;
use crate::io::views;
use crate::types::{
    Category, Item, ItemId, LendingError, Transaction, TransactionId, User, UserId,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

const MESSAGE_EXIT: &str = "Bye. Your data has been saved.";

/// Command names with their usage, in the order `list-commands` prints them
pub const USAGES: [(&str, &str); 16] = [
    (parser::COMMAND_EXIT, "exit"),
    (parser::COMMAND_LIST_COMMANDS, "list-commands"),
    (parser::COMMAND_LIST_USERS, "list-users"),
    (parser::COMMAND_LIST_ITEMS, "list-items"),
    (parser::COMMAND_LIST_TX, "list-tx"),
    (parser::COMMAND_VIEW_USER, "view-user /u <user id>"),
    (parser::COMMAND_VIEW_ITEM, "view-item /i <item id>"),
    (parser::COMMAND_VIEW_TX, "view-tx /t <transaction id>"),
    (parser::COMMAND_ADD_USER, "add-user /n <name>"),
    (
        parser::COMMAND_ADD_ITEM,
        "add-item /n <name> /c <category 1-6> /p <price per day> /u <owner id>",
    ),
    (
        parser::COMMAND_ADD_TX,
        "add-tx /i <item id> /b <borrower id> /d <days> [/c <yyyy-mm-dd>]",
    ),
    (parser::COMMAND_REMOVE_USER, "remove-user /u <user id>"),
    (parser::COMMAND_REMOVE_ITEM, "remove-item /i <item id>"),
    (parser::COMMAND_REMOVE_TX, "remove-tx /t <transaction id>"),
    (
        parser::COMMAND_UPDATE_ITEM,
        "update-item /i <item id> /p <price per day>",
    ),
    (parser::COMMAND_FIND_ITEM, "find-item /k <keyword>"),
];

/// A parsed request, ready to run against the lists
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Exit,
    ListCommands,
    ListUsers,
    ListItems,
    ListTransactions,
    ViewUser { parts: Vec<String> },
    ViewItem { parts: Vec<String> },
    ViewTransaction { parts: Vec<String> },
    AddUser { parts: Vec<String> },
    AddItem { parts: Vec<String> },
    AddTransaction { parts: Vec<String> },
    RemoveUser { parts: Vec<String> },
    RemoveItem { parts: Vec<String> },
    RemoveTransaction { parts: Vec<String> },
    UpdateItem { parts: Vec<String> },
    FindItem { parts: Vec<String> },
}

impl Command {
    /// The command token this variant is parsed from
    pub fn name(&self) -> &'static str {
        match self {
            Command::Exit => parser::COMMAND_EXIT,
            Command::ListCommands => parser::COMMAND_LIST_COMMANDS,
            Command::ListUsers => parser::COMMAND_LIST_USERS,
            Command::ListItems => parser::COMMAND_LIST_ITEMS,
            Command::ListTransactions => parser::COMMAND_LIST_TX,
            Command::ViewUser { .. } => parser::COMMAND_VIEW_USER,
            Command::ViewItem { .. } => parser::COMMAND_VIEW_ITEM,
            Command::ViewTransaction { .. } => parser::COMMAND_VIEW_TX,
            Command::AddUser { .. } => parser::COMMAND_ADD_USER,
            Command::AddItem { .. } => parser::COMMAND_ADD_ITEM,
            Command::AddTransaction { .. } => parser::COMMAND_ADD_TX,
            Command::RemoveUser { .. } => parser::COMMAND_REMOVE_USER,
            Command::RemoveItem { .. } => parser::COMMAND_REMOVE_ITEM,
            Command::RemoveTransaction { .. } => parser::COMMAND_REMOVE_TX,
            Command::UpdateItem { .. } => parser::COMMAND_UPDATE_ITEM,
            Command::FindItem { .. } => parser::COMMAND_FIND_ITEM,
        }
    }

    /// Run the command
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The session should end (only `exit`)
    /// * `Ok(false)` - The command completed
    /// * `Err(LendingError)` - The command was rejected; the lists are unchanged
    pub fn execute(
        &self,
        context: &mut LendingContext,
        ui: &mut dyn Ui,
    ) -> Result<bool, LendingError> {
        match self {
            Command::Exit => {
                ui.print_response(MESSAGE_EXIT);
                return Ok(true);
            }
            Command::ListCommands => ui.print_response(&list_commands()),
            Command::ListUsers => ui.print_response(&views::list_view(&context.lists.users)),
            Command::ListItems => ui.print_response(&views::list_view(&context.lists.items)),
            Command::ListTransactions => ui.print_response(&views::transaction_list_view(
                &context.lists.transactions,
                context.today(),
            )),
            Command::ViewUser { parts } => view_user(parts, context, ui)?,
            Command::ViewItem { parts } => view_item(parts, context, ui)?,
            Command::ViewTransaction { parts } => view_transaction(parts, context, ui)?,
            Command::AddUser { parts } => add_user(parts, context, ui)?,
            Command::AddItem { parts } => add_item(parts, context, ui)?,
            Command::AddTransaction { parts } => add_transaction(parts, context, ui)?,
            Command::RemoveUser { parts } => remove_user(parts, context, ui)?,
            Command::RemoveItem { parts } => remove_item(parts, context, ui)?,
            Command::RemoveTransaction { parts } => remove_transaction(parts, context, ui)?,
            Command::UpdateItem { parts } => update_item(parts, context, ui)?,
            Command::FindItem { parts } => find_item(parts, context, ui)?,
        }
        Ok(false)
    }
}

fn list_commands() -> String {
    let mut text = String::from("Here are the commands you can use:");
    for (position, (_, usage)) in USAGES.iter().enumerate() {
        text.push_str(&format!("\n   {}. {}", position + 1, usage));
    }
    text
}

fn view_user(
    parts: &[String],
    context: &mut LendingContext,
    ui: &mut dyn Ui,
) -> Result<(), LendingError> {
    let flags = Flags::parse(parts, &["u"])?;
    let lists = &context.lists;
    let user = lists.users.get(flags.required("u")?)?;

    let items = lists.items.owned_by(user.id());
    let spent = TransactionList::total_money(lists.transactions.borrowed_by(user.id()));
    let earned = TransactionList::total_money(lists.transactions.lent_by(user.id()));

    ui.print_response(&views::user_view(user, &items, spent, earned));
    Ok(())
}

fn view_item(
    parts: &[String],
    context: &mut LendingContext,
    ui: &mut dyn Ui,
) -> Result<(), LendingError> {
    let flags = Flags::parse(parts, &["i"])?;
    let item = context.lists.items.get(flags.required("i")?)?;
    ui.print_response(&views::item_view(item));
    Ok(())
}

fn view_transaction(
    parts: &[String],
    context: &mut LendingContext,
    ui: &mut dyn Ui,
) -> Result<(), LendingError> {
    let flags = Flags::parse(parts, &["t"])?;
    let tx = context.lists.transactions.get(flags.required("t")?)?;
    ui.print_response(&views::transaction_view(tx, context.today()));
    Ok(())
}

fn add_user(
    parts: &[String],
    context: &mut LendingContext,
    ui: &mut dyn Ui,
) -> Result<(), LendingError> {
    let flags = Flags::parse(parts, &["n"])?;
    let name = validate_name(flags.required("n")?)?;

    let user = User::new(UserId::new(context.next_id()), name);
    let message = format!("New user added:\n{}", user);
    context.lists.users.push(user);

    ui.print_response(&message);
    Ok(())
}

fn add_item(
    parts: &[String],
    context: &mut LendingContext,
    ui: &mut dyn Ui,
) -> Result<(), LendingError> {
    let flags = Flags::parse(parts, &["n", "c", "p", "u"])?;
    let name = validate_name(flags.required("n")?)?;
    let category = parse_category(flags.required("c")?)?;
    let price = parse_price(flags.required("p")?)?;
    let owner = context.lists.users.get(flags.required("u")?)?.id().clone();

    let item = Item::new(ItemId::new(context.next_id()), name, category, price, owner)?;
    let message = format!("New item added:\n{}", item);
    context.lists.items.push(item);

    ui.print_response(&message);
    Ok(())
}

fn add_transaction(
    parts: &[String],
    context: &mut LendingContext,
    ui: &mut dyn Ui,
) -> Result<(), LendingError> {
    let flags = Flags::parse(parts, &["i", "b", "d", "c"])?;
    let today = context.today();
    let lists = &context.lists;

    let item = lists.items.get(flags.required("i")?)?;
    let borrower = lists.users.get(flags.required("b")?)?;
    let lender = lists.users.get(item.owner_id().as_str())?;
    if lender.id() == borrower.id() {
        return Err(LendingError::invalid_argument(
            "The borrower cannot be the owner of the item",
        ));
    }

    let duration = parse_duration(flags.required("d")?)?;
    let created_at = match flags.optional("c") {
        Some(date) => parse_date(date)?,
        None => today,
    };
    if !item.is_available() || lists.transactions.has_open_loan(item.id()) {
        return Err(LendingError::ItemUnavailable {
            id: item.id().to_string(),
        });
    }
    let money = item
        .price_per_day()
        .checked_mul(Decimal::from(duration))
        .ok_or_else(|| LendingError::invalid_argument("The total price is too large"))?;

    let (item_name, item_id) = (item.name().to_string(), item.id().clone());
    let (lender_id, borrower_id) = (lender.id().clone(), borrower.id().clone());

    let tx = Transaction::new(
        TransactionId::new(context.next_id()),
        item_name,
        item_id.clone(),
        lender_id,
        borrower_id,
        duration,
        created_at,
        money,
    );
    let message = format!("New transaction added:\n{}", tx.describe(today));

    context.lists.transactions.push(tx);
    context.lists.items.get_mut(item_id.as_str())?.set_available(false);

    ui.print_response(&message);
    Ok(())
}

fn remove_user(
    parts: &[String],
    context: &mut LendingContext,
    ui: &mut dyn Ui,
) -> Result<(), LendingError> {
    let flags = Flags::parse(parts, &["u"])?;
    let lists = &context.lists;
    let user = lists.users.get(flags.required("u")?)?;

    let owned = lists.items.owned_by(user.id()).len();
    if owned > 0 {
        return Err(LendingError::UserInUse {
            id: user.id().to_string(),
            reason: format!("they still own {} item(s)", owned),
        });
    }
    let involved = lists.transactions.involving(user.id()).len();
    if involved > 0 {
        return Err(LendingError::UserInUse {
            id: user.id().to_string(),
            reason: format!("they appear in {} transaction(s)", involved),
        });
    }

    let id = user.id().clone();
    let removed = context.lists.users.remove(id.as_str())?;
    ui.print_response(&format!("User removed:\n{}", removed));
    Ok(())
}

fn remove_item(
    parts: &[String],
    context: &mut LendingContext,
    ui: &mut dyn Ui,
) -> Result<(), LendingError> {
    let flags = Flags::parse(parts, &["i"])?;
    let lists = &context.lists;
    let item = lists.items.get(flags.required("i")?)?;

    if let Some(tx) = lists.transactions.referencing_item(item.id()) {
        return Err(LendingError::ItemInUse {
            id: item.id().to_string(),
            transaction: tx.id().to_string(),
        });
    }

    let id = item.id().clone();
    let removed = context.lists.items.remove(id.as_str())?;
    ui.print_response(&format!("Item removed:\n{}", removed));
    Ok(())
}

fn remove_transaction(
    parts: &[String],
    context: &mut LendingContext,
    ui: &mut dyn Ui,
) -> Result<(), LendingError> {
    let flags = Flags::parse(parts, &["t"])?;
    let lists = &mut context.lists;
    let tx = lists.transactions.get(flags.required("t")?)?;
    let (id, item_id, open) = (tx.id().clone(), tx.item_id().clone(), !tx.is_finished());

    // Resolve the item first so a failure leaves both lists untouched
    let item = lists.items.get_mut(item_id.as_str())?;
    if open {
        item.set_available(true);
    }
    let removed = lists.transactions.remove(id.as_str())?;

    ui.print_response(&format!("Transaction removed:\n{}", removed));
    Ok(())
}

fn update_item(
    parts: &[String],
    context: &mut LendingContext,
    ui: &mut dyn Ui,
) -> Result<(), LendingError> {
    let flags = Flags::parse(parts, &["i", "p"])?;
    let price = parse_price(flags.required("p")?)?;
    let item = context.lists.items.get_mut(flags.required("i")?)?;

    item.update_price(price)?;
    ui.print_response(&format!("Item updated:\n{}", item));
    Ok(())
}

fn find_item(
    parts: &[String],
    context: &mut LendingContext,
    ui: &mut dyn Ui,
) -> Result<(), LendingError> {
    let flags = Flags::parse(parts, &["k"])?;
    let keyword = flags.required("k")?;
    let found = context.lists.items.search(keyword);
    ui.print_response(&views::search_view(keyword, &found));
    Ok(())
}

/// Names end up as one column of a one-line record, so they cannot hold the
/// column separator or any control character (a lone `\r` ends a record)
fn validate_name(name: &str) -> Result<&str, LendingError> {
    if name.contains('|') {
        return Err(LendingError::invalid_argument(format!(
            "Name '{}' cannot contain '|'",
            name
        )));
    }
    if name.chars().any(char::is_control) {
        return Err(LendingError::invalid_argument(format!(
            "Name '{}' cannot contain control characters",
            name.escape_debug()
        )));
    }
    Ok(name)
}

fn parse_category(value: &str) -> Result<Category, LendingError> {
    let code: u8 = value.parse().map_err(|_| {
        LendingError::invalid_argument(format!("Category '{}' is not a category code", value))
    })?;
    Category::from_code(code)
}

fn parse_price(value: &str) -> Result<Decimal, LendingError> {
    let price = Decimal::from_str(value).map_err(|_| {
        LendingError::invalid_argument(format!("Price '{}' is not a number", value))
    })?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(LendingError::invalid_argument(format!(
            "Price {} cannot be negative",
            value
        )));
    }
    Ok(price)
}

fn parse_duration(value: &str) -> Result<u32, LendingError> {
    match value.parse::<u32>() {
        Ok(days) if days > 0 => Ok(days),
        _ => Err(LendingError::invalid_argument(format!(
            "Duration '{}' must be a positive number of days",
            value
        ))),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, LendingError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        LendingError::invalid_argument(format!("Date '{}' must be in yyyy-mm-dd format", value))
    })
}
