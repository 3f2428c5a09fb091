//! Filter-scoped operations
//!
//! `FilterCommands` is the full operation set keyed by filter name.
//! `Filter` binds one name so callers working with a single filter don't
//! have to repeat it.

use std::collections::HashMap;

use crate::client::BloomClient;
use crate::error::Result;
use crate::network::Connector;
use crate::protocol::CreateOptions;
use crate::types::KeyChecks;

/// Operations on named filters
pub trait FilterCommands {
    fn create(&mut self, filter: &str, options: &CreateOptions) -> Result<bool>;
    fn drop_filter(&mut self, filter: &str) -> Result<bool>;
    fn close(&mut self, filter: &str) -> Result<bool>;
    fn clear(&mut self, filter: &str) -> Result<bool>;
    fn flush(&mut self, filter: Option<&str>) -> Result<bool>;
    fn check(&mut self, filter: &str, key: &str) -> Result<bool>;
    fn set(&mut self, filter: &str, key: &str) -> Result<bool>;
    fn multi<K: AsRef<str>>(&mut self, filter: &str, keys: &[K]) -> Result<KeyChecks>;
    fn any<K: AsRef<str>>(&mut self, filter: &str, keys: &[K]) -> Result<bool>;
    fn all<K: AsRef<str>>(&mut self, filter: &str, keys: &[K]) -> Result<bool>;
    fn bulk<K: AsRef<str>>(&mut self, filter: &str, keys: &[K]) -> Result<String>;
    fn info(&mut self, filter: &str) -> Result<HashMap<String, String>>;
}

impl<C: Connector> FilterCommands for BloomClient<C> {
    fn create(&mut self, filter: &str, options: &CreateOptions) -> Result<bool> {
        BloomClient::<C>::create(self, filter, options)
    }

    fn drop_filter(&mut self, filter: &str) -> Result<bool> {
        BloomClient::<C>::drop_filter(self, filter)
    }

    fn close(&mut self, filter: &str) -> Result<bool> {
        BloomClient::<C>::close(self, filter)
    }

    fn clear(&mut self, filter: &str) -> Result<bool> {
        BloomClient::<C>::clear(self, filter)
    }

    fn flush(&mut self, filter: Option<&str>) -> Result<bool> {
        BloomClient::<C>::flush(self, filter)
    }

    fn check(&mut self, filter: &str, key: &str) -> Result<bool> {
        BloomClient::<C>::check(self, filter, key)
    }

    fn set(&mut self, filter: &str, key: &str) -> Result<bool> {
        BloomClient::<C>::set(self, filter, key)
    }

    fn multi<K: AsRef<str>>(&mut self, filter: &str, keys: &[K]) -> Result<KeyChecks> {
        BloomClient::<C>::multi(self, filter, keys)
    }

    fn any<K: AsRef<str>>(&mut self, filter: &str, keys: &[K]) -> Result<bool> {
        BloomClient::<C>::any(self, filter, keys)
    }

    fn all<K: AsRef<str>>(&mut self, filter: &str, keys: &[K]) -> Result<bool> {
        BloomClient::<C>::all(self, filter, keys)
    }

    fn bulk<K: AsRef<str>>(&mut self, filter: &str, keys: &[K]) -> Result<String> {
        BloomClient::<C>::bulk(self, filter, keys)
    }

    fn info(&mut self, filter: &str) -> Result<HashMap<String, String>> {
        BloomClient::<C>::info(self, filter)
    }
}

/// A filter name bound to a client
pub struct Filter<'a, T: FilterCommands> {
    client: &'a mut T,
    name: String,
}

impl<'a, T: FilterCommands> Filter<'a, T> {
    pub fn new(client: &'a mut T, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn create(&mut self, options: &CreateOptions) -> Result<bool> {
        self.client.create(&self.name, options)
    }

    pub fn drop_filter(&mut self) -> Result<bool> {
        self.client.drop_filter(&self.name)
    }

    pub fn close(&mut self) -> Result<bool> {
        self.client.close(&self.name)
    }

    pub fn clear(&mut self) -> Result<bool> {
        self.client.clear(&self.name)
    }

    /// Flush this filter only
    pub fn flush(&mut self) -> Result<bool> {
        self.client.flush(Some(self.name.as_str()))
    }

    pub fn check(&mut self, key: &str) -> Result<bool> {
        self.client.check(&self.name, key)
    }

    pub fn set(&mut self, key: &str) -> Result<bool> {
        self.client.set(&self.name, key)
    }

    pub fn multi<K: AsRef<str>>(&mut self, keys: &[K]) -> Result<KeyChecks> {
        self.client.multi(&self.name, keys)
    }

    pub fn any<K: AsRef<str>>(&mut self, keys: &[K]) -> Result<bool> {
        self.client.any(&self.name, keys)
    }

    pub fn all<K: AsRef<str>>(&mut self, keys: &[K]) -> Result<bool> {
        self.client.all(&self.name, keys)
    }

    pub fn bulk<K: AsRef<str>>(&mut self, keys: &[K]) -> Result<String> {
        self.client.bulk(&self.name, keys)
    }

    pub fn info(&mut self) -> Result<HashMap<String, String>> {
        self.client.info(&self.name)
    }
}
