use serde::Serialize;

pub mod contact;
pub mod settings;

#[derive(Serialize)]
pub struct ApiError<D> {
    pub detail: D,
}
