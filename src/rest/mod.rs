//! REST resource infrastructure for the Airwallex API.
//!
//! This module provides:
//!
//! - **[`Resource`]**: A schema-less record with dirty tracking and partial save
//! - **Capability traits**: [`ApiResource`] plus [`Create`], [`Retrieve`],
//!   [`List`], [`Update`] and [`Delete`], implemented selectively per resource
//! - **[`PaginatedList`]**: One page of results with cursor or offset
//!   pagination, and [`AutoPager`] for walking every page
//! - **[`resources`]**: The concrete Airwallex resources (payment intents,
//!   transfers, quotes, ...)
//!
//! # Example
//!
//! ```rust,ignore
//! use airwallex_api::rest::{Create, List, Update};
//! use airwallex_api::resources::PaymentIntent;
//! use serde_json::json;
//!
//! let mut intent = PaymentIntent::create(
//!     &client,
//!     json!({"amount": 100, "currency": "USD", "merchant_order_id": "o_1"}),
//!     None,
//! )
//! .await?;
//!
//! intent.set("descriptor", "ACME*ORDER1");
//! intent.save(&client, None).await?;
//!
//! intent.confirm(&client, json!({"payment_method_id": "pm_1"}), None).await?;
//!
//! let page = PaymentIntent::list(&client, None, None).await?;
//! page.for_each_across_all_pages(&client, None, |intent| {
//!     println!("{:?} {:?}", intent.id(), intent.get_str("status"));
//! })
//! .await?;
//! ```

mod list;
mod operations;
mod resource;
pub mod resources;

pub use list::{AutoPager, PaginatedList, DEFAULT_PAGE_SIZE};
pub use operations::{ApiResource, Create, Delete, List, Retrieve, Update};
pub use resource::Resource;

pub(crate) use operations::post_action;
