// stockroom_dashboard/src/flows/assignment_flow.rs

//! "Assign product": move a quantity of a product between a warehouse and a shop.

use crate::errors::AppError;
use crate::flows::common_steps::{self, require_text};
use crate::flows::contexts::AssignProductCtxData;
use stockroom::model::{Activity, AssignmentDirection};
use stockroom::{ContextData, Flow, FlowControl, FlowRegistry, StepDef};
use tracing::{event, info, instrument, Level};

pub const FLOW_NAME: &str = "assign_product";

pub fn build_assignment_flow() -> Flow<AssignProductCtxData, AppError> {
  let mut flow = Flow::<AssignProductCtxData, AppError>::new(
    FLOW_NAME,
    [
      StepDef::critical("validate_assignment"),
      StepDef::critical("submit_assignment"),
      StepDef::best_effort("refetch_product"),
      StepDef::best_effort("log_activity"),
    ],
  );

  flow
    .on("validate_assignment", validate_assignment)
    .on("submit_assignment", submit_assignment)
    .on("refetch_product", refetch_product)
    .on("log_activity", |ctx_data: ContextData<AssignProductCtxData>| async move {
      let (app_state, action_id, activity) = {
        let guard = ctx_data.read();
        let request = &guard.request;
        let activity = Activity::new("assigned_product", request.product_id.clone()).with_detail(format!(
          "{} units {} ({} / {})",
          request.quantity,
          request.direction.as_str(),
          request.warehouse_id,
          request.shop_id
        ));
        (guard.app_state.clone(), guard.action_id, activity)
      };
      common_steps::log_activity_step(app_state, action_id, activity).await
    });

  flow
}

pub fn register_assignment_flow(registry: &FlowRegistry<AppError>) {
  registry.register(build_assignment_flow());
}

#[instrument(name = "assignment_flow::validate", skip(ctx_data), err(Display))]
async fn validate_assignment(ctx_data: ContextData<AssignProductCtxData>) -> Result<FlowControl, AppError> {
  let (api, request) = {
    let guard = ctx_data.read();
    (guard.app_state.api.clone(), guard.request.clone())
  };

  event!(Level::DEBUG, product_id = %request.product_id, "Validating assignment input.");
  require_text("productId", &request.product_id, "Choose a product to assign.")?;
  require_text("warehouseId", &request.warehouse_id, "Choose a warehouse.")?;
  require_text("shopId", &request.shop_id, "Choose a shop.")?;
  if request.quantity == 0 {
    return Err(AppError::Validation("Quantity must be at least 1.".to_string()));
  }

  // Shipping out of the warehouse cannot exceed what it holds.
  let product = api.get_product(&request.product_id).await?;
  if request.direction == AssignmentDirection::WarehouseToShop && request.quantity > product.stock {
    return Err(AppError::Validation(format!(
      "Only {} units of {} are in stock.",
      product.stock, product.name
    )));
  }
  Ok(FlowControl::Continue)
}

#[instrument(name = "assignment_flow::submit", skip(ctx_data), err(Display))]
async fn submit_assignment(ctx_data: ContextData<AssignProductCtxData>) -> Result<FlowControl, AppError> {
  let (api, request) = {
    let guard = ctx_data.read();
    (guard.app_state.api.clone(), guard.request.clone())
  };

  let created = api.create_assignment(&request).await?;
  info!(assignment_id = %created.id, product_id = %created.product_id, "Assignment created.");
  ctx_data.write().created = Some(created);
  Ok(FlowControl::Continue)
}

async fn refetch_product(ctx_data: ContextData<AssignProductCtxData>) -> Result<FlowControl, AppError> {
  let (api, product_id) = {
    let guard = ctx_data.read();
    (guard.app_state.api.clone(), guard.request.product_id.clone())
  };

  let product = api.get_product(&product_id).await?;
  event!(Level::DEBUG, product_id = %product.id, stock = product.stock, "Product refetched after assignment.");
  ctx_data.write().product_after = Some(product);
  Ok(FlowControl::Continue)
}
