//! Typed accessors over a store view.
//!
//! Key construction and (de)serialization only. Absent keys come back as
//! `Ok(None)`.

use crate::adapters::codec::decode_text;
use crate::domain::keys::{display_key, singleton, KeyPrefix, RoleDirectory};
use crate::domain::{
    AllowedMinIal, AllowedModeList, ApproveService, NamespaceList, NodeDetail, NodeIdList,
    ProvidedServiceList, ReferenceGroup, Request, ServiceDestinationList, ServiceDetail,
    ServiceDetailList, StateError,
};
use crate::ports::{RecordCodec, StateReader, StateWriter};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

pub struct EntityRepository<'a, R: StateReader, C: RecordCodec> {
    reader: &'a R,
    codec: &'a C,
}

impl<'a, R: StateReader, C: RecordCodec> EntityRepository<'a, R, C> {
    pub fn new(reader: &'a R, codec: &'a C) -> Self {
        Self { reader, codec }
    }

    pub fn reader(&self) -> &'a R {
        self.reader
    }

    pub fn codec(&self) -> &'a C {
        self.codec
    }

    pub fn height(&self) -> Result<u64, StateError> {
        Ok(self.reader.height()?)
    }

    pub fn raw(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.reader.get(key)?)
    }

    pub fn record<T: Serialize + DeserializeOwned>(
        &self,
        key: &[u8],
    ) -> Result<Option<T>, StateError> {
        match self.reader.get(key)? {
            Some(bytes) => self.decode(key, &bytes).map(Some),
            None => Ok(None),
        }
    }

    pub fn text(&self, key: &[u8]) -> Result<Option<String>, StateError> {
        match self.reader.get(key)? {
            Some(bytes) => decode_text(&bytes).map(Some).map_err(|e| {
                error!(key = %display_key(key), error = %e, "stored text is not UTF-8");
                e.into()
            }),
            None => Ok(None),
        }
    }

    fn decode<T: Serialize + DeserializeOwned>(
        &self,
        key: &[u8],
        bytes: &[u8],
    ) -> Result<T, StateError> {
        self.codec.decode(bytes).map_err(|e| {
            error!(key = %display_key(key), error = %e, "failed to decode stored record");
            e.into()
        })
    }

    pub fn node(&self, node_id: &str) -> Result<Option<NodeDetail>, StateError> {
        self.record(&KeyPrefix::Node.key(&[node_id]))
    }

    /// Node record for a mutation. An absent record is decoded as empty
    /// bytes, so it fails as a decode error rather than "not found".
    pub fn node_or_decode_error(&self, node_id: &str) -> Result<NodeDetail, StateError> {
        let key = KeyPrefix::Node.key(&[node_id]);
        let bytes = self.reader.get(&key)?.unwrap_or_default();
        self.decode(&key, &bytes)
    }

    pub fn nodes_behind_proxy(&self, proxy_id: &str) -> Result<Option<NodeIdList>, StateError> {
        self.record(&KeyPrefix::BehindProxyNode.key(&[proxy_id]))
    }

    pub fn role_directory(&self, role: RoleDirectory) -> Result<Option<NodeIdList>, StateError> {
        self.record(role.key())
    }

    pub fn service(&self, service_id: &str) -> Result<Option<ServiceDetail>, StateError> {
        self.record(&KeyPrefix::Service.key(&[service_id]))
    }

    pub fn services(&self) -> Result<Option<ServiceDetailList>, StateError> {
        self.record(singleton::ALL_SERVICE)
    }

    pub fn service_destinations(
        &self,
        service_id: &str,
    ) -> Result<Option<ServiceDestinationList>, StateError> {
        self.record(&KeyPrefix::ServiceDestination.key(&[service_id]))
    }

    pub fn approval(
        &self,
        service_id: &str,
        node_id: &str,
    ) -> Result<Option<ApproveService>, StateError> {
        self.record(&KeyPrefix::ApprovedService.key(&[service_id, node_id]))
    }

    pub fn provided_services(&self, as_id: &str) -> Result<Option<ProvidedServiceList>, StateError> {
        self.record(&KeyPrefix::ProvidedServices.key(&[as_id]))
    }

    pub fn reference_group(&self, code: &str) -> Result<Option<ReferenceGroup>, StateError> {
        self.record(&KeyPrefix::RefGroupCode.key(&[code]))
    }

    pub fn ref_code_by_identity(
        &self,
        namespace: &str,
        identifier_hash: &str,
    ) -> Result<Option<String>, StateError> {
        self.text(&KeyPrefix::IdentityToRefCode.key(&[namespace, identifier_hash]))
    }

    pub fn ref_code_by_accessor(&self, accessor_id: &str) -> Result<Option<String>, StateError> {
        self.text(&KeyPrefix::AccessorToRefCode.key(&[accessor_id]))
    }

    pub fn allowed_mode_list(&self, purpose: &str) -> Result<Option<AllowedModeList>, StateError> {
        self.record(&KeyPrefix::AllowedModeList.key(&[purpose]))
    }

    pub fn request(&self, request_id: &str) -> Result<Option<Request>, StateError> {
        self.record(&KeyPrefix::Request.key(&[request_id]))
    }

    pub fn data_signature(
        &self,
        node_id: &str,
        service_id: &str,
        request_id: &str,
    ) -> Result<Option<String>, StateError> {
        self.text(&KeyPrefix::DataSignature.key(&[node_id, service_id, request_id]))
    }

    pub fn namespaces(&self) -> Result<Option<NamespaceList>, StateError> {
        self.record(singleton::ALL_NAMESPACE)
    }

    pub fn init_state(&self) -> Result<Option<String>, StateError> {
        self.text(singleton::INIT_STATE)
    }

    pub fn chain_history(&self) -> Result<Option<Vec<u8>>, StateError> {
        self.raw(singleton::CHAIN_HISTORY_INFO)
    }

    pub fn allowed_min_ial_first_idp(&self) -> Result<Option<AllowedMinIal>, StateError> {
        self.record(singleton::ALLOWED_MIN_IAL_FIRST_IDP)
    }
}

impl<R: StateWriter, C: RecordCodec> EntityRepository<'_, R, C> {
    pub fn put_record<T: Serialize>(&self, key: &[u8], record: &T) -> Result<(), StateError> {
        let bytes = self.codec.encode(record)?;
        self.reader.set(key, bytes)?;
        Ok(())
    }

    pub fn put_text(&self, key: &[u8], text: &str) -> Result<(), StateError> {
        self.reader.set(key, text.as_bytes().to_vec())?;
        Ok(())
    }

    pub fn put_node(&self, node_id: &str, node: &NodeDetail) -> Result<(), StateError> {
        self.put_record(&KeyPrefix::Node.key(&[node_id]), node)
    }
}
