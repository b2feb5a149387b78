//! MongoDB repository adapter.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};

use profast_types::{
    BookingRepository, Parcel, ParcelId, Payment, PaymentStatus, RepoError, StatusUpdate,
};

use crate::documents::{
    parcel_from_document, parcel_to_document, payment_from_document, payment_to_document,
};

// ─────────────────────────────────────────────────────────────────────────────
// MongoDB Repository
// ─────────────────────────────────────────────────────────────────────────────

/// MongoDB repository implementation over the `parcels` and `payments`
/// collections.
#[derive(Clone)]
pub struct MongoRepo {
    parcels: Collection<Document>,
    payments: Collection<Document>,
}

impl MongoRepo {
    /// Connects to a deployment, pings it, and declares the unique index
    /// on `parcels.trackingId`.
    pub async fn connect(uri: &str, database: &str) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(uri).await?;

        client
            .database("admin")
            .run_command(doc! {"ping": 1})
            .await?;
        tracing::info!("Connected to MongoDB deployment");

        let db = client.database(database);
        let parcels = db.collection::<Document>("parcels");
        let payments = db.collection::<Document>("payments");

        let index = IndexModel::builder()
            .keys(doc! {"trackingId": 1})
            .options(IndexOptions::builder().unique(true).build())
            .build();
        parcels.create_index(index).await?;
        tracing::debug!("Unique index on parcels.trackingId is in place");

        Ok(Self { parcels, payments })
    }
}

/// Maps a driver error, surfacing duplicate-key violations (code 11000 on
/// the unique tracking-id index) as a distinct conflict.
fn map_store_err(e: mongodb::error::Error) -> RepoError {
    if let ErrorKind::Write(WriteFailure::WriteError(write_err)) = &*e.kind {
        if write_err.code == 11000 {
            return RepoError::Conflict(write_err.message.clone());
        }
    }
    RepoError::Database(e.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl BookingRepository for MongoRepo {
    async fn insert_parcel(&self, parcel: Parcel) -> Result<Parcel, RepoError> {
        let doc = parcel_to_document(&parcel)?;
        self.parcels.insert_one(doc).await.map_err(map_store_err)?;
        Ok(parcel)
    }

    async fn list_parcels(&self, email: Option<&str>) -> Result<Vec<Parcel>, RepoError> {
        let filter = match email {
            Some(email) => doc! {"email": email},
            None => Document::new(),
        };

        let docs: Vec<Document> = self
            .parcels
            .find(filter)
            .sort(doc! {"createdDate": -1})
            .await
            .map_err(map_store_err)?
            .try_collect()
            .await
            .map_err(map_store_err)?;

        docs.into_iter().map(parcel_from_document).collect()
    }

    async fn find_parcel(&self, id: ParcelId) -> Result<Option<Parcel>, RepoError> {
        let doc = self
            .parcels
            .find_one(doc! {"_id": id.as_object_id()})
            .await
            .map_err(map_store_err)?;

        doc.map(parcel_from_document).transpose()
    }

    async fn set_payment_status(
        &self,
        id: ParcelId,
        status: PaymentStatus,
    ) -> Result<StatusUpdate, RepoError> {
        let result = self
            .parcels
            .update_one(
                doc! {"_id": id.as_object_id()},
                doc! {"$set": {"paymentStatus": status.to_string()}},
            )
            .await
            .map_err(map_store_err)?;

        Ok(StatusUpdate {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_parcel(&self, id: ParcelId) -> Result<bool, RepoError> {
        let result = self
            .parcels
            .delete_one(doc! {"_id": id.as_object_id()})
            .await
            .map_err(map_store_err)?;

        Ok(result.deleted_count > 0)
    }

    async fn insert_payment(&self, payment: Payment) -> Result<Payment, RepoError> {
        let doc = payment_to_document(&payment);
        self.payments.insert_one(doc).await.map_err(map_store_err)?;
        Ok(payment)
    }

    async fn list_payments(&self, email: &str) -> Result<Vec<Payment>, RepoError> {
        let docs: Vec<Document> = self
            .payments
            .find(doc! {"userEmail": email})
            .sort(doc! {"createdAt": -1})
            .await
            .map_err(map_store_err)?
            .try_collect()
            .await
            .map_err(map_store_err)?;

        docs.into_iter().map(payment_from_document).collect()
    }
}
