use crate::api_model::MessageResponse;
use crate::command_line_interface::CliOptions;
use crate::constants;
use crate::error::ErrorContext;
use crate::error::Result;
use crate::internal_api;
use crate::item_repository::ItemRepository;
use bytes::Bytes;
use log::info;
use log::warn;
use percent_encoding::percent_decode_str;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::sync::Mutex;
use warp::http::status::StatusCode;
use warp::Filter;
use warp::Rejection;
use warp::Reply;

/// Start web framework with specified APIs.
pub async fn run_server(cli_options: &CliOptions, repository: Arc<Mutex<ItemRepository>>) {
    let package_name = env!("CARGO_PKG_NAME").to_uppercase();
    let addr = cli_options.socket_addr();
    info!("Starting {} HTTP server on http://{}", package_name, addr);

    warp::serve(routes(repository).with(warp::log("items_api::warp_api")))
        .run(addr)
        .await;
}

/// All item endpoints, without binding to a socket.
pub fn routes(
    repository: Arc<Mutex<ItemRepository>>,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    // GET all items, in insertion order.
    let repo = repository.clone();
    let get_all_items = warp::path!("items")
        .and(warp::get())
        .map(move || {
            let result: Result<_> = Ok(internal_api::get_all_items(&repo));
            respond(result, StatusCode::OK)
        });

    // GET a single item.
    // Parameter:
    //     id: the item id; a segment without leading digits matches nothing.
    let repo = repository.clone();
    let get_item = warp::path!("items" / String)
        .and(warp::get())
        .map(move |id: String| {
            let result = internal_api::get_item(&repo, path_id(&id));
            respond(result, StatusCode::OK)
        });

    // POST a new item.
    // Input: json object of the item. Any `id` it carries is replaced.
    // Return the stored item with its assigned id.
    let repo = repository.clone();
    let create_item = warp::path!("items")
        .and(warp::post())
        .and(warp::body::bytes())
        .map(move |body: Bytes| {
            let result = decode_body(&body).map(|payload| internal_api::create_item(&repo, payload));
            respond(result, StatusCode::CREATED)
        });

    // PUT (update) a single item
    // Input:
    //      - id of the item to be updated
    //      - json of the fields to overwrite
    // Return the merged item.
    let repo = repository.clone();
    let update_item = warp::path!("items" / String)
        .and(warp::put())
        .and(warp::body::bytes())
        .map(move |id: String, body: Bytes| {
            let result = decode_body(&body).and_then(|patch| {
                internal_api::update_item(&repo, path_id(&id), patch)
            });
            respond(result, StatusCode::OK)
        });

    // DELETE every item with the given id. Succeeds even if none matched.
    let repo = repository;
    let delete_item = warp::path!("items" / String)
        .and(warp::delete())
        .map(move |id: String| {
            internal_api::delete_item(&repo, path_id(&id));
            let result: Result<_> = Ok(MessageResponse::new(constants::ITEM_DELETED));
            respond(result, StatusCode::OK)
        });

    get_all_items
        .or(get_item)
        .or(create_item)
        .or(update_item)
        .or(delete_item)
}

/// Path segments arrive percent-encoded, so `/items/%31` addresses item 1.
fn path_id(segment: &str) -> Option<i64> {
    internal_api::parse_id(&percent_decode_str(segment).decode_utf8_lossy())
}

/// An empty body is treated as an empty JSON object.
fn decode_body<T: DeserializeOwned + Default>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let value = serde_path_to_error::deserialize(&mut deserializer)
        .context_str("failed to parse request body")?;
    deserializer
        .end()
        .context_str("unexpected data after request body")?;
    Ok(value)
}

fn respond<T: Serialize>(result: Result<T>, success: StatusCode) -> Box<dyn Reply> {
    match result {
        Ok(value) => Box::new(warp::reply::with_status(warp::reply::json(&value), success)),
        Err(err) => {
            if err.code == StatusCode::BAD_REQUEST {
                warn!("Rejecting request, {}", err);
            }
            let body = MessageResponse { message: err.msg };
            Box::new(warp::reply::with_status(warp::reply::json(&body), err.code))
        }
    }
}
