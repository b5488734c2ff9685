// stockroom/examples/order_progress.rs

use rust_decimal::Decimal;
use stockroom::model::PaymentStatus;
use stockroom::{icon_for, progress_for, workflow_for, OrderStatus, PaymentSummary, StepState};

fn main() {
  // 1. Badge values for every status string the backend might send
  println!("{:<20} {:>8}  {:<16} icon", "status", "progress", "class");
  for raw in [
    "pending_payment",
    "paid",
    "packaged",
    "out_for_delivery",
    "delivered",
    "cancelled",
    "on_hold",
  ] {
    println!(
      "{:<20} {:>7}%  {:<16} {}",
      raw,
      progress_for(raw),
      stockroom::color_class_for(raw),
      icon_for(raw)
    );
  }

  // 2. The fulfilment checklist for an order that has just been packaged
  let view = workflow_for(&OrderStatus::parse("packaged"));
  println!("\nWorkflow at {}%:", view.progress);
  for step in &view.steps {
    let mark = match step.state {
      StepState::Completed => "[x]",
      StepState::Active => "[>]",
      StepState::Pending => "[ ]",
    };
    println!("  {} {}", mark, step.label);
  }

  // 3. Payment panel of a partially paid order
  let summary = PaymentSummary::compute(
    &PaymentStatus::parse("partial"),
    Decimal::new(100_000, 0),
    Some(Decimal::new(40_000, 0)),
  );
  println!(
    "\nTotal {} / paid {} / balance {} ({}% paid)",
    summary.total, summary.paid, summary.balance, summary.paid_percent
  );
}
