//! `Ratings` endpoint.

use crate::client::FhrsClient;
use crate::error::Error;
use crate::transport::Transport;
use crate::types::Ratings;

#[derive(Debug)]
pub struct RatingsService<'a, T> {
    client: &'a FhrsClient<T>,
}

impl<'a, T: Transport> RatingsService<'a, T> {
    pub(crate) fn new(client: &'a FhrsClient<T>) -> Self {
        Self { client }
    }

    /// All rating values the API can award.
    pub fn list(&self) -> Result<Option<Ratings>, Error> {
        self.client.execute("Ratings", &[])
    }
}
