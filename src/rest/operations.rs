//! Capability traits for Airwallex resources.
//!
//! Each resource type implements [`ApiResource`] (its path and how to wrap a
//! [`Resource`]) and then opts into the operations the endpoint supports by
//! implementing the empty marker-style traits below. Every operation has a
//! default implementation that routes through [`Client`].
//!
//! | Trait        | Wire call                         |
//! |--------------|-----------------------------------|
//! | [`Create`]   | `POST <path>/create`              |
//! | [`Retrieve`] | `GET <path>/<id>`                 |
//! | [`List`]     | `GET <path>?<params>`             |
//! | [`Update`]   | `PUT <path>/<id>`                 |
//! | [`Delete`]   | `DELETE <path>/<id>`              |
//!
//! # Example
//!
//! ```rust,ignore
//! use airwallex_api::rest::{Create, Retrieve, Update};
//! use airwallex_api::resources::Customer;
//! use serde_json::json;
//!
//! let mut customer = Customer::create(&client, json!({"email": "a@example.com"}), None).await?;
//! customer.set("first_name", "Ada");
//! customer.save(&client, None).await?; // PUT with {"first_name": "Ada"} only
//!
//! let same = Customer::retrieve(&client, customer.id().unwrap(), None).await?;
//! ```

use serde_json::{Map, Value};

use crate::clients::{Client, RequestOptions};
use crate::error::Error;
use crate::rest::list::PaginatedList;
use crate::rest::resource::{member_path, Resource};

/// A resource type backed by a [`Resource`] record at a fixed API path.
#[allow(async_fn_in_trait)]
pub trait ApiResource: Sized {
    /// The collection path, e.g. `/api/v1/transfers`.
    const PATH: &'static str;

    /// Wraps a record.
    fn from_resource(resource: Resource) -> Self;

    /// Returns the underlying record.
    fn resource(&self) -> &Resource;

    /// Returns the underlying record mutably.
    fn resource_mut(&mut self) -> &mut Resource;

    /// Wraps a decoded response body.
    #[must_use]
    fn from_value(value: Value) -> Self {
        Self::from_resource(Resource::from_value(value))
    }

    /// Re-reads this entity from `GET <path>/<id>`.
    ///
    /// # Errors
    ///
    /// Returns an `UnknownAttribute` error if the entity has no id, or any
    /// error from the request.
    async fn refresh(&mut self, client: &Client) -> Result<(), Error> {
        self.resource_mut()
            .refresh_from_server(client, Self::PATH)
            .await
    }
}

/// Resources that can be created.
#[allow(async_fn_in_trait)]
pub trait Create: ApiResource {
    /// Creates an entity with `POST <path>/create`.
    ///
    /// A `request_id` idempotency key is added unless `params` has one.
    ///
    /// # Errors
    ///
    /// Returns any error from the request.
    async fn create(
        client: &Client,
        params: Value,
        options: Option<&RequestOptions>,
    ) -> Result<Self, Error> {
        let path = format!("{}/create", Self::PATH);
        let data = client.post(&path, params, options).await?;
        Ok(Self::from_value(data))
    }
}

/// Resources that can be fetched by id.
#[allow(async_fn_in_trait)]
pub trait Retrieve: ApiResource {
    /// Fetches an entity with `GET <path>/<id>`.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error for unknown ids, or any other request error.
    async fn retrieve(
        client: &Client,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<Self, Error> {
        let data = client
            .get(&member_path(Self::PATH, id), None, options)
            .await?;
        Ok(Self::from_value(data))
    }
}

/// Resources that can be listed.
#[allow(async_fn_in_trait)]
pub trait List: ApiResource {
    /// Fetches one page with `GET <path>?<params>`.
    ///
    /// The parameters are kept on the returned page so that
    /// [`PaginatedList::next_page`] can derive the following request.
    ///
    /// # Errors
    ///
    /// Returns any error from the request.
    async fn list(
        client: &Client,
        params: Option<&Map<String, Value>>,
        options: Option<&RequestOptions>,
    ) -> Result<PaginatedList<Self>, Error> {
        let data = client.get(Self::PATH, params, options).await?;
        Ok(PaginatedList::from_response(
            data,
            params.cloned().unwrap_or_default(),
        ))
    }
}

/// Resources that can be updated.
#[allow(async_fn_in_trait)]
pub trait Update: ApiResource {
    /// Updates the entity `id` with `PUT <path>/<id>` and returns the result.
    ///
    /// # Errors
    ///
    /// Returns any error from the request.
    async fn update(
        client: &Client,
        id: &str,
        params: Value,
        options: Option<&RequestOptions>,
    ) -> Result<Self, Error> {
        let data = client
            .put(&member_path(Self::PATH, id), params, options)
            .await?;
        Ok(Self::from_value(data))
    }

    /// Sends `params` as an update of this entity and loads the response.
    ///
    /// # Errors
    ///
    /// Returns an `UnknownAttribute` error if the entity has no id, or any
    /// error from the request.
    async fn update_with(
        &mut self,
        client: &Client,
        params: Value,
        options: Option<&RequestOptions>,
    ) -> Result<(), Error> {
        let path = self.resource().member_path(Self::PATH)?;
        let data = client.put(&path, params, options).await?;
        self.resource_mut().load_from(data);
        Ok(())
    }

    /// Persists local changes.
    ///
    /// Does nothing (and sends nothing) when no field was written since the
    /// last load. Otherwise sends only the current values of the changed
    /// fields and loads the server's response.
    ///
    /// # Errors
    ///
    /// See [`Update::update_with`].
    async fn save(&mut self, client: &Client, options: Option<&RequestOptions>) -> Result<(), Error> {
        if !self.resource().is_dirty() {
            return Ok(());
        }
        let changes = Value::Object(self.resource().changes());
        self.update_with(client, changes, options).await
    }
}

/// Resources that can be deleted.
#[allow(async_fn_in_trait)]
pub trait Delete: ApiResource {
    /// Deletes the entity `id` with `DELETE <path>/<id>`.
    ///
    /// # Errors
    ///
    /// Returns any error from the request.
    async fn delete(
        client: &Client,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> Result<(), Error> {
        client
            .delete(&member_path(Self::PATH, id), None, options)
            .await?;
        Ok(())
    }
}

/// Invokes `POST <path>/<id>/<action>` and loads the returned entity.
pub(crate) async fn post_action<R: ApiResource>(
    resource: &mut R,
    client: &Client,
    action: &str,
    params: Value,
    options: Option<&RequestOptions>,
) -> Result<(), Error> {
    let path = format!("{}/{action}", resource.resource().member_path(R::PATH)?);
    let data = client.post(&path, params, options).await?;
    resource.resource_mut().load_from(data);
    Ok(())
}
