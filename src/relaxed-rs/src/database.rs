use relaxed_core::{catalog, map_etag, map_exists, Call, CouchResult, Result};

use crate::client::CouchClient;

/// Operations on a single database
pub struct Database<'a> {
    client: &'a CouchClient,
    name: String,
}

impl<'a> Database<'a> {
    pub(crate) fn new(client: &'a CouchClient, name: String) -> Self {
        Self { client, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn call(&self) -> Call {
        Call::new().segment("db", self.name.as_str())
    }

    /// HEAD probe for the database.
    ///
    /// Only a 200 reports `true`; a missing database and a server error both report `false`.
    pub async fn exists(&self) -> Result<bool> {
        let response = self.client.invoke_raw(&catalog::DB_EXISTS, self.call()).await?;
        Ok(map_exists(&response))
    }

    /// Current revision of a document, from the `ETag` of a HEAD request
    pub async fn get_doc_info(&self, docid: &str) -> Result<CouchResult<String>> {
        let response = self
            .client
            .invoke_raw(&catalog::DOC_INFO, self.call().segment("docid", docid))
            .await?;
        Ok(map_etag(&response))
    }
}
