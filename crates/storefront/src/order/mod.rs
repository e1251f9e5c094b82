//! Order submission.
//!
//! An [`OrderRequest`] is what the order form posts: the cart lines and the
//! customer's contact and delivery details. [`OrderRequest::validate`] checks
//! the form and prices every line against the catalog again; the client's
//! prices are never used.

mod message;

use oleh_garden_core::{Email, EmailError, HeightTag, Phone, PhoneError, Price, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use message::{escape_markdown, render_message};

use crate::cart::CartItem;
use crate::catalog::ProductLookup;

/// Errors that can occur when validating an order.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order has no items")]
    EmptyOrder,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid phone: {0}")]
    InvalidPhone(#[from] PhoneError),

    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Nova Poshta city and warehouse must be selected")]
    MissingDelivery,

    #[error("quantity of product {0} must be at least 1")]
    ZeroQuantity(ProductId),

    /// Lines whose product is gone or out of stock.
    #[error("products no longer available: {}", join_ids(.0))]
    Unavailable(Vec<ProductId>),
}

fn join_ids(ids: &[ProductId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Contact and delivery details as typed into the order form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub np_city_name: Option<String>,
    /// `DeliveryCity` ref from the settlement search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub np_city_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub np_warehouse_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub np_warehouse_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub np_warehouse_address: Option<String>,
}

/// A cart line as posted. Only `id`, `qty` and `height` matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    pub qty: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<HeightTag>,
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            qty: item.qty,
            height: item.height.clone(),
        }
    }
}

/// Body of `POST /api/telegram`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub customer_info: CustomerInfo,
}

/// Nova Poshta warehouse the order ships to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub city_name: Option<String>,
    pub city_ref: String,
    pub warehouse_ref: String,
    pub warehouse_number: Option<String>,
    pub warehouse_address: Option<String>,
}

/// Validated customer details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub surname: String,
    pub phone: Phone,
    pub email: Option<Email>,
    pub address: Option<String>,
    pub comments: Option<String>,
    pub delivery: Delivery,
}

/// An order line priced from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub id: ProductId,
    pub title: String,
    pub qty: u32,
    pub price: Price,
    /// e.g. `600 грн/шт (1м)`.
    pub label: String,
}

impl PricedLine {
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.price.line_total(self.qty)
    }
}

/// A validated, priced order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub customer: Customer,
    pub lines: Vec<PricedLine>,
}

impl Order {
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.qty)).sum()
    }

    #[must_use]
    pub fn total_amount(&self) -> u64 {
        self.lines.iter().map(PricedLine::line_total).sum()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn required(value: String, field: &'static str) -> Result<String, OrderError> {
    non_blank(Some(value)).ok_or(OrderError::MissingField(field))
}

impl CustomerInfo {
    /// Validate the form fields.
    ///
    /// # Errors
    ///
    /// Returns `OrderError` for a missing name, surname or phone, an invalid
    /// phone or email, or a missing Nova Poshta selection.
    pub fn validate(self) -> Result<Customer, OrderError> {
        let name = required(self.name, "name")?;
        let surname = required(self.surname, "surname")?;
        let phone = Phone::parse(&required(self.phone, "phone")?)?;
        let email = non_blank(self.email)
            .map(|e| Email::parse(&e))
            .transpose()?;

        let (Some(city_ref), Some(warehouse_ref)) = (
            non_blank(self.np_city_ref),
            non_blank(self.np_warehouse_ref),
        ) else {
            return Err(OrderError::MissingDelivery);
        };

        Ok(Customer {
            name,
            surname,
            phone,
            email,
            address: non_blank(self.address),
            comments: non_blank(self.comments),
            delivery: Delivery {
                city_name: non_blank(self.np_city_name),
                city_ref,
                warehouse_ref,
                warehouse_number: non_blank(self.np_warehouse_number),
                warehouse_address: non_blank(self.np_warehouse_address),
            },
        })
    }
}

impl OrderRequest {
    /// Build a request from cart contents.
    #[must_use]
    pub fn from_cart(items: &[CartItem], customer_info: CustomerInfo) -> Self {
        Self {
            items: items.iter().map(OrderLine::from).collect(),
            customer_info,
        }
    }

    /// Validate the form and price every line from the catalog.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::EmptyOrder` without lines, `ZeroQuantity` for a
    /// line of zero, `Unavailable` listing every line whose product is gone
    /// or out of stock, or any customer validation error.
    pub fn validate<C>(self, catalog: &C) -> Result<Order, OrderError>
    where
        C: ProductLookup + ?Sized,
    {
        if self.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        let customer = self.customer_info.validate()?;

        if let Some(line) = self.items.iter().find(|line| line.qty == 0) {
            return Err(OrderError::ZeroQuantity(line.id));
        }

        let mut lines = Vec::with_capacity(self.items.len());
        let mut unavailable = Vec::new();
        for line in &self.items {
            match catalog.resolve_for_sale(line.id, line.height.as_ref()) {
                Ok((product, resolved)) => lines.push(PricedLine {
                    id: line.id,
                    title: product.title.clone(),
                    qty: line.qty,
                    price: resolved.price,
                    label: resolved.label,
                }),
                Err(reason) => unavailable.push(reason.product_id()),
            }
        }

        if !unavailable.is_empty() {
            return Err(OrderError::Unavailable(unavailable));
        }

        Ok(Order { customer, lines })
    }
}
