use crate::caller::Caller;
use actix_web::error::{InternalError, PathError};
use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse, Responder};
use notepad::errors::NoteStoreError;
use notepad::notestore::BoxedNoteStore;
use notepad::{dispatch, Address, NoteID, Operation};
use serde::Deserialize;
use serde_json::json;

fn error_body(e: &NoteStoreError) -> serde_json::Value {
    json!({
        "error": e.code(),
        "message": e.to_string(),
    })
}

fn notestore_error_handler(e: &NoteStoreError) -> HttpResponse {
    let body = error_body(e);
    match e {
        NoteStoreError::NoteNotExist(_) => HttpResponse::NotFound().json(body),
        NoteStoreError::NoteDeleted(_) => HttpResponse::Gone().json(body),
        NoteStoreError::Unauthorized(_, _) => HttpResponse::Forbidden().json(body),
        NoteStoreError::NotShared(_, _) => HttpResponse::Conflict().json(body),
        NoteStoreError::UnknownOperation => HttpResponse::BadRequest().json(body),
        NoteStoreError::ContentTooLong(_, _) => HttpResponse::PayloadTooLarge().json(body),
        NoteStoreError::UnsupportedSchema(_)
        | NoteStoreError::IOError(_)
        | NoteStoreError::SerdeError(_) => {
            error!("Note store internal error {:?}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Requests that match no route.
pub async fn unknown_operation() -> HttpResponse {
    HttpResponse::NotFound().json(error_body(&NoteStoreError::UnknownOperation))
}

/// Path segments that don't parse.
///
/// A note ID that isn't a `u64` names no note; a malformed address is a call
/// that matches no operation, as on `/call`.
fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    let bad_id = req
        .match_info()
        .get("note_id")
        .map_or(false, |id| id.parse::<NoteID>().is_err());
    let response = if bad_id {
        // ID 0 is never handed out
        notestore_error_handler(&NoteStoreError::NoteNotExist(NoteID::new(0)))
    } else {
        notestore_error_handler(&NoteStoreError::UnknownOperation)
    };
    debug!(error = %err, status = %response.status(), "rejected path");
    InternalError::from_response(err, response).into()
}

#[derive(Deserialize)]
struct NotePostData {
    content: String,
}

#[post("/note")]
#[instrument(skip(store, caller, note), fields(caller = %caller.0))]
async fn add_note(
    store: web::Data<BoxedNoteStore>,
    caller: Caller,
    note: web::Json<NotePostData>,
) -> impl Responder {
    let res = store.add_note(caller.0, note.into_inner().content).await;
    match res {
        Ok(id) => HttpResponse::Ok().json(json!({ "id": id })),
        Err(e) => notestore_error_handler(&e),
    }
}

#[get("/note")]
#[instrument(skip(store, caller), fields(caller = %caller.0))]
async fn get_user_notes(store: web::Data<BoxedNoteStore>, caller: Caller) -> impl Responder {
    match store.get_user_notes(caller.0).await {
        Ok(ids) => HttpResponse::Ok().json(ids),
        Err(e) => notestore_error_handler(&e),
    }
}

#[get("/note/{note_id}")]
#[instrument(
    skip(store, caller, params),
    fields(
        caller = %caller.0,
        note_id = %params.0
    )
)]
async fn get_shared_note(
    store: web::Data<BoxedNoteStore>,
    caller: Caller,
    params: web::Path<(NoteID,)>,
) -> impl Responder {
    let (note_id,) = params.into_inner();
    match store.get_shared_note(note_id, caller.0).await {
        Ok(content) => HttpResponse::Ok().json(json!({
            "id": note_id,
            "content": content,
        })),
        Err(e) => notestore_error_handler(&e),
    }
}

#[delete("/note/{note_id}")]
#[instrument(
    skip(store, caller, params),
    fields(
        caller = %caller.0,
        note_id = %params.0
    )
)]
async fn delete_note(
    store: web::Data<BoxedNoteStore>,
    caller: Caller,
    params: web::Path<(NoteID,)>,
) -> impl Responder {
    let (note_id,) = params.into_inner();
    match store.delete_note(note_id, caller.0).await {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(e) => notestore_error_handler(&e),
    }
}

#[derive(Deserialize)]
struct SharingPutData {
    is_public: bool,
    #[serde(default)]
    addresses: Vec<Address>,
}

#[put("/note/{note_id}/sharing")]
#[instrument(
    skip(store, caller, params, sharing),
    fields(
        caller = %caller.0,
        note_id = %params.0
    )
)]
async fn update_sharing_settings(
    store: web::Data<BoxedNoteStore>,
    caller: Caller,
    params: web::Path<(NoteID,)>,
    sharing: web::Json<SharingPutData>,
) -> impl Responder {
    let (note_id,) = params.into_inner();
    let sharing = sharing.into_inner();
    let res = store
        .update_sharing_settings(note_id, caller.0, sharing.is_public, sharing.addresses)
        .await;
    match res {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(e) => notestore_error_handler(&e),
    }
}

#[delete("/note/{note_id}/sharing/{address}")]
#[instrument(
    skip(store, caller, params),
    fields(
        caller = %caller.0,
        note_id = %params.0,
        address = %params.1
    )
)]
async fn remove_shared_address(
    store: web::Data<BoxedNoteStore>,
    caller: Caller,
    params: web::Path<(NoteID, Address)>,
) -> impl Responder {
    let (note_id, address) = params.into_inner();
    match store.remove_shared_address(note_id, caller.0, address).await {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(e) => notestore_error_handler(&e),
    }
}

/// Run an operation given as data, e.g. `{"op": "getSharedNote", "id": 1}`.
#[post("/call")]
#[instrument(skip(store, caller, request), fields(caller = %caller.0))]
async fn call(
    store: web::Data<BoxedNoteStore>,
    caller: Caller,
    request: web::Bytes,
) -> impl Responder {
    // Bodies that aren't even JSON are unknown operations too
    let request = serde_json::from_slice(&request).unwrap_or(serde_json::Value::Null);
    let operation = match Operation::parse(request) {
        Ok(operation) => operation,
        Err(e) => return notestore_error_handler(&e),
    };
    debug!(operation = operation.name(), "dispatching");
    match dispatch(store.get_ref().as_ref(), caller.0, operation).await {
        Ok(output) => HttpResponse::Ok().json(json!({ "result": output })),
        Err(e) => notestore_error_handler(&e),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(add_note)
        .service(get_user_notes)
        .service(get_shared_note)
        .service(delete_note)
        .service(update_sharing_settings)
        .service(remove_shared_address)
        .service(call);
}
