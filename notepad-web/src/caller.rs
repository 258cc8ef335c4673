//! Who is making a request.
//!
//! Authentication is left to whatever sits in front of this service;
//! the caller's address is taken as given from the `X-Caller-Address` header.
use actix_web::dev::Payload;
use actix_web::error::ErrorUnauthorized;
use actix_web::{FromRequest, HttpRequest};
use notepad::Address;
use std::future::{ready, Ready};

pub const CALLER_HEADER: &str = "x-caller-address";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub Address);

impl FromRequest for Caller {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(caller_from_request(req))
    }
}

fn caller_from_request(req: &HttpRequest) -> Result<Caller, actix_web::Error> {
    let header = req
        .headers()
        .get(CALLER_HEADER)
        .ok_or_else(|| ErrorUnauthorized("missing caller address"))?;
    let address = header
        .to_str()
        .map_err(|_| ErrorUnauthorized("caller address is not valid text"))?
        .parse::<Address>()
        .map_err(|e| ErrorUnauthorized(e.to_string()))?;
    Ok(Caller(address))
}
