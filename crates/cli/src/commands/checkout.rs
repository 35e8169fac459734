//! Checkout progress.

use shopfront_client::views::{AddressBookView, CheckoutStep, StepIndicator};

use super::{CliError, Context};

/// `shop checkout <step>`
///
/// From the shipping step on, also shows the address the order will ship to.
#[allow(clippy::print_stdout)]
pub async fn show(ctx: &Context, step: CheckoutStep) -> Result<(), CliError> {
    let indicator = StepIndicator::new(step);
    println!("{}", indicator.render());
    println!("{}% complete", indicator.percent_complete());

    if step < CheckoutStep::Shipping {
        return Ok(());
    }

    ctx.addresses.initialize().await;
    let book = AddressBookView::build(&ctx.addresses.snapshot());
    match book.selected() {
        Some(card) => println!("Shipping to: {}, {}", card.title, card.lines.join(", ")),
        None => println!("No shipping address selected. Use `shop addresses select <id>`."),
    }

    if let Some(previous) = step.previous() {
        println!("Back: {}", previous.label());
    }
    if let Some(next) = step.next() {
        println!("Next: {}", next.label());
    }
    Ok(())
}
