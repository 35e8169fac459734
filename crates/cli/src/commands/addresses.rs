//! Address book commands.

use clap::Args;
use shopfront_client::api::{Address, AddressInput, AddressPatch};
use shopfront_client::views::{ActionOutcome, AddressBookView, AddressCard, delete_address};
use shopfront_core::AddressId;

use super::{CliError, Context, print_list};

/// Fields for a new address.
#[derive(Debug, Args)]
pub struct AddressArgs {
    /// Recipient name
    #[arg(short = 'n', long)]
    pub name: String,
    /// Street address
    #[arg(long)]
    pub line1: String,
    /// Apartment, suite, etc.
    #[arg(long)]
    pub line2: Option<String>,
    #[arg(long)]
    pub city: String,
    /// State or province
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub postal_code: String,
    #[arg(long)]
    pub country: String,
    #[arg(long)]
    pub phone: Option<String>,
    /// Make this the default address
    #[arg(long)]
    pub default: bool,
}

impl From<AddressArgs> for AddressInput {
    fn from(args: AddressArgs) -> Self {
        Self {
            full_name: args.name,
            phone: args.phone,
            address_line1: args.line1,
            address_line2: args.line2,
            city: args.city,
            state: args.state,
            postal_code: args.postal_code,
            country: args.country,
            is_default: args.default,
        }
    }
}

/// Fields to change on an existing address. Omitted flags are left alone.
#[derive(Debug, Args)]
pub struct AddressEditArgs {
    #[arg(short = 'n', long)]
    pub name: Option<String>,
    #[arg(long)]
    pub line1: Option<String>,
    #[arg(long)]
    pub line2: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub postal_code: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    /// Set or unset the default flag
    #[arg(long)]
    pub default: Option<bool>,
}

impl From<AddressEditArgs> for AddressPatch {
    fn from(args: AddressEditArgs) -> Self {
        Self {
            full_name: args.name,
            phone: args.phone,
            address_line1: args.line1,
            address_line2: args.line2,
            city: args.city,
            state: args.state,
            postal_code: args.postal_code,
            country: args.country,
            is_default: args.default,
        }
    }
}

fn card_line(card: &AddressCard) -> String {
    let badges = card.badges();
    let badges = if badges.is_empty() {
        String::new()
    } else {
        format!(" ({})", badges.join(", "))
    };
    format!("{}{badges}  [{}]\n    {}", card.title, card.id, card.lines.join(", "))
}

#[allow(clippy::print_stdout)]
fn print_address(address: &Address, selected: Option<&AddressId>) {
    let card = AddressCard::new(address, selected);
    println!("{}", card_line(&card));
    if let Some(phone) = &card.phone {
        println!("    {phone}");
    }
}

/// `shop addresses list`
pub async fn list(ctx: &Context) -> Result<(), CliError> {
    ctx.addresses.initialize().await;
    let book = AddressBookView::build(&ctx.addresses.snapshot());
    print_list(&book.view, "No saved addresses.", card_line);
    Ok(())
}

/// `shop addresses show <id>`
pub async fn show(ctx: &Context, id: &AddressId) -> Result<(), CliError> {
    let address = ctx
        .addresses
        .fetch_one(id)
        .await
        .ok_or_else(|| CliError::NotFound(format!("Address {id}")))?;
    let selected = ctx.addresses.selected();
    print_address(&address, selected.as_ref());
    Ok(())
}

/// `shop addresses add ...`
pub async fn add(ctx: &Context, args: AddressArgs) -> Result<(), CliError> {
    let input = AddressInput::from(args);
    let address = ctx
        .addresses
        .create(&input)
        .await
        .ok_or(CliError::ActionFailed("Saving the address"))?;
    print_address(&address, None);
    Ok(())
}

/// `shop addresses edit <id> ...`
pub async fn edit(ctx: &Context, id: &AddressId, fields: AddressEditArgs) -> Result<(), CliError> {
    let patch = AddressPatch::from(fields);
    if patch.is_empty() {
        return Err(CliError::InvalidInput(
            "pass at least one field to change".to_string(),
        ));
    }

    let address = ctx
        .addresses
        .update(id, &patch)
        .await
        .ok_or(CliError::ActionFailed("Updating the address"))?;
    print_address(&address, None);
    Ok(())
}

/// `shop addresses remove <id>`
pub async fn remove(ctx: &Context, id: &AddressId) -> Result<(), CliError> {
    // Loads the persisted selection so deleting the selected address clears it.
    ctx.addresses.initialize().await;

    match delete_address(&ctx.addresses, &ctx.confirm, id).await {
        ActionOutcome::Declined | ActionOutcome::Succeeded => Ok(()),
        ActionOutcome::Failed => Err(CliError::ActionFailed("Deleting the address")),
    }
}

/// `shop addresses select <id>`
pub async fn select(ctx: &Context, id: AddressId) -> Result<(), CliError> {
    ctx.addresses.initialize().await;
    let state = ctx.addresses.snapshot();
    if let Some(error) = state.error() {
        return Err(CliError::InvalidInput(format!(
            "cannot check address {id}: {error}"
        )));
    }
    if state.get(&id).is_none() {
        return Err(CliError::NotFound(format!("Address {id}")));
    }

    ctx.addresses.select(id);
    if let Some(card) = AddressBookView::build(&ctx.addresses.snapshot()).selected() {
        tracing::info!("Checkout will ship to {}", card.title);
    }
    Ok(())
}

/// `shop addresses selected [--clear]`
#[allow(clippy::print_stdout)]
pub async fn selected(ctx: &Context, clear: bool) -> Result<(), CliError> {
    if clear {
        ctx.addresses.clear_selection();
        return Ok(());
    }

    ctx.addresses.initialize().await;
    let book = AddressBookView::build(&ctx.addresses.snapshot());
    match book.selected() {
        Some(card) => println!("{}", card_line(card)),
        None => println!("No address selected. Use `shop addresses select <id>`."),
    }
    Ok(())
}
