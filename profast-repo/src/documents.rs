//! BSON document mapping between the store and domain types.
//!
//! Parcels carry arbitrary caller-supplied fields at the top level of the
//! document, so the mapping is explicit: typed fields are written after the
//! opaque ones, guaranteeing the service-owned values win, and reads peel
//! the typed fields off before handing the remainder back as `details`.

use mongodb::bson::{Bson, Document, doc};

use profast_types::{
    Parcel, ParcelId, ParcelStatus, Payment, PaymentId, PaymentStatus, RepoError, TrackingId,
};

pub(crate) fn parcel_to_document(parcel: &Parcel) -> Result<Document, RepoError> {
    let mut doc = Document::new();
    for (key, value) in &parcel.details {
        let bson = Bson::try_from(value.clone())
            .map_err(|e| RepoError::Malformed(format!("field {key}: {e}")))?;
        doc.insert(key, bson);
    }

    // Service-owned fields last: a caller-supplied "trackingId" or
    // "paymentStatus" must never survive into the stored record.
    doc.insert("_id", parcel.id.as_object_id());
    doc.insert("trackingId", parcel.tracking_id.as_str());
    doc.insert("createdDate", &parcel.created_date);
    doc.insert("paymentStatus", parcel.payment_status.to_string());
    doc.insert("parcelStatus", parcel.parcel_status.as_str());

    Ok(doc)
}

pub(crate) fn parcel_from_document(mut doc: Document) -> Result<Parcel, RepoError> {
    let id = match doc.remove("_id") {
        Some(Bson::ObjectId(oid)) => ParcelId::from_object_id(oid),
        _ => return Err(RepoError::Malformed("parcel document missing _id".into())),
    };
    let tracking_id = TrackingId::from_string(take_string(&mut doc, "trackingId")?);
    let created_date = take_string(&mut doc, "createdDate")?;
    let payment_status = take_string(&mut doc, "paymentStatus")?
        .parse::<PaymentStatus>()
        .map_err(RepoError::Malformed)?;
    let parcel_status = ParcelStatus::from_string(take_string(&mut doc, "parcelStatus")?);

    let details = doc
        .into_iter()
        .map(|(k, v)| (k, v.into_relaxed_extjson()))
        .collect();

    Ok(Parcel {
        id,
        tracking_id,
        created_date,
        payment_status,
        parcel_status,
        details,
    })
}

pub(crate) fn payment_to_document(payment: &Payment) -> Document {
    doc! {
        "_id": payment.id.as_object_id(),
        "trackingId": &payment.tracking_id,
        "userEmail": &payment.user_email,
        "amount": payment.amount,
        "transactionId": &payment.transaction_id,
        "status": &payment.status,
        "createdAt": &payment.created_at,
    }
}

pub(crate) fn payment_from_document(mut doc: Document) -> Result<Payment, RepoError> {
    let id = match doc.remove("_id") {
        Some(Bson::ObjectId(oid)) => PaymentId::from_object_id(oid),
        _ => return Err(RepoError::Malformed("payment document missing _id".into())),
    };

    Ok(Payment {
        id,
        tracking_id: take_string(&mut doc, "trackingId")?,
        user_email: take_string(&mut doc, "userEmail")?,
        amount: take_number(&mut doc, "amount")?,
        transaction_id: take_string(&mut doc, "transactionId")?,
        status: take_string(&mut doc, "status")?,
        created_at: take_string(&mut doc, "createdAt")?,
    })
}

fn take_string(doc: &mut Document, key: &str) -> Result<String, RepoError> {
    match doc.remove(key) {
        Some(Bson::String(s)) => Ok(s),
        Some(other) => Err(RepoError::Malformed(format!(
            "field {key} is not a string: {other}"
        ))),
        None => Err(RepoError::Malformed(format!("missing field {key}"))),
    }
}

fn take_number(doc: &mut Document, key: &str) -> Result<f64, RepoError> {
    match doc.remove(key) {
        Some(Bson::Double(v)) => Ok(v),
        Some(Bson::Int32(v)) => Ok(v as f64),
        Some(Bson::Int64(v)) => Ok(v as f64),
        Some(other) => Err(RepoError::Malformed(format!(
            "field {key} is not numeric: {other}"
        ))),
        None => Err(RepoError::Malformed(format!("missing field {key}"))),
    }
}
