//! Airwallex resources.
//!
//! Every resource is a thin newtype over [`Resource`](crate::rest::Resource)
//! bound to its API path. Field access, dirty tracking and `save` come from
//! the record; the operations each endpoint supports come from the capability
//! traits in [`crate::rest`], and endpoint-specific actions (confirming a
//! payment intent, cancelling a transfer, ...) are inherent methods.
//!
//! | Resource            | Path                          |
//! |---------------------|-------------------------------|
//! | [`PaymentIntent`]   | `/api/v1/pa/payment_intents`  |
//! | [`Transfer`]        | `/api/v1/transfers`           |
//! | [`Beneficiary`]     | `/api/v1/beneficiaries`       |
//! | [`Refund`]          | `/api/v1/pa/refunds`          |
//! | [`PaymentMethod`]   | `/api/v1/pa/payment_methods`  |
//! | [`Customer`]        | `/api/v1/pa/customers`        |
//! | [`BatchTransfer`]   | `/api/v1/batch_transfers`     |
//! | [`Dispute`]         | `/api/v1/disputes`            |
//! | [`Quote`]           | `/api/v1/fx/quotes`           |
//! | [`Conversion`]      | `/api/v1/conversions`         |
//! | [`Rate`]            | `/api/v1/fx/rates/current`    |
//! | [`Balance`]         | `/api/v1/balances/current`    |

/// Declares a resource newtype and wires it to [`ApiResource`].
///
/// [`ApiResource`]: crate::rest::ApiResource
macro_rules! define_resource {
    ($(#[$meta:meta])* $name:ident => $path:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
        #[serde(transparent)]
        pub struct $name($crate::rest::Resource);

        impl $crate::rest::ApiResource for $name {
            const PATH: &'static str = $path;

            fn from_resource(resource: $crate::rest::Resource) -> Self {
                Self(resource)
            }

            fn resource(&self) -> &$crate::rest::Resource {
                &self.0
            }

            fn resource_mut(&mut self) -> &mut $crate::rest::Resource {
                &mut self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = $crate::rest::Resource;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl std::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl From<$crate::rest::Resource> for $name {
            fn from(resource: $crate::rest::Resource) -> Self {
                Self(resource)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

mod balance;
mod batch_transfer;
mod beneficiary;
mod conversion;
mod customer;
mod dispute;
mod payment_intent;
mod payment_method;
mod quote;
mod rate;
mod refund;
mod transfer;

pub use balance::Balance;
pub use batch_transfer::BatchTransfer;
pub use beneficiary::Beneficiary;
pub use conversion::Conversion;
pub use customer::Customer;
pub use dispute::Dispute;
pub use payment_intent::PaymentIntent;
pub use payment_method::PaymentMethod;
pub use quote::Quote;
pub use rate::Rate;
pub use refund::Refund;
pub use transfer::Transfer;
