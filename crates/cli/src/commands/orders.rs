//! Order commands.

use shopfront_client::views::{ActionOutcome, OrderRow, OrdersPage, cancel_order};
use shopfront_core::{OrderId, OrderTab, Price};

use super::{CliError, Context, print_list};

/// `shop orders list --tab <tab>`
#[allow(clippy::print_stdout)]
pub async fn list(ctx: &Context, tab: OrderTab) -> Result<(), CliError> {
    ctx.orders.fetch_all().await;
    let page = OrdersPage::build(&ctx.orders.snapshot(), tab);

    println!(
        "{} (current: {}, past: {})",
        page.tab.title(),
        page.current_count,
        page.past_count
    );
    print_list(&page.view, page.empty_message(), OrderRow::line);
    Ok(())
}

/// `shop orders show <id>`
#[allow(clippy::print_stdout)]
pub async fn show(ctx: &Context, id: &OrderId) -> Result<(), CliError> {
    let order = ctx
        .orders
        .fetch_one(id)
        .await
        .ok_or_else(|| CliError::NotFound(format!("Order {id}")))?;

    let row = OrderRow::from(&order);
    println!("{}", row.line());
    for item in &order.items {
        println!(
            "    {:>3} x {:<30} {:>10}",
            item.quantity,
            item.name,
            Price::new(item.line_total(), order.total.currency_code).display()
        );
    }
    if let Some(address) = &order.shipping_address {
        println!("    Ships to: {}", address.formatted_single_line());
    }
    if let Some(reason) = &order.return_reason {
        println!("    Return requested: {reason}");
    }

    let mut actions = Vec::new();
    if row.can_cancel {
        actions.push("cancel");
    }
    if row.can_return {
        actions.push("return");
    }
    if !actions.is_empty() {
        println!("    Available: {}", actions.join(", "));
    }
    Ok(())
}

/// `shop orders cancel <id>`
pub async fn cancel(ctx: &Context, id: &OrderId) -> Result<(), CliError> {
    match cancel_order(&ctx.orders, &ctx.confirm, id).await {
        ActionOutcome::Declined | ActionOutcome::Succeeded => Ok(()),
        ActionOutcome::Failed => Err(CliError::ActionFailed("Cancelling the order")),
    }
}

/// `shop orders return <id> --reason <text>`
pub async fn request_return(ctx: &Context, id: &OrderId, reason: &str) -> Result<(), CliError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(CliError::InvalidInput(
            "a return needs a reason".to_string(),
        ));
    }

    if ctx.orders.request_return(id, reason).await {
        Ok(())
    } else {
        Err(CliError::ActionFailed("Requesting the return"))
    }
}
