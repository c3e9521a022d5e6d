use std::sync::Arc;

use cfgtext_import::{check_upload, ConfigFileFormat, ImportTarget};
use cfgtext_resolve::{
    preview, render, ChangeSet, ChangeSummary, Document, PropertiesResolver, TextPreview, TextResolver,
};
use cfgtext_store::{AppliedChangeSet, ItemStore, NamespaceInfo};
use cfgtext_types::NamespaceId;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::audit::{AuditRecord, AuditSink, TracingAudit};
use crate::config::SdkConfig;
use crate::error::{SdkError, SdkResult};

/// A change set computed but not applied.
#[derive(Clone, Debug, Serialize)]
pub struct Plan {
    pub namespace: NamespaceId,
    /// Revision of the baseline the plan was computed against.
    pub base_revision: u64,
    pub changes: ChangeSet,
    #[serde(skip)]
    pub preview: TextPreview,
}

/// What an applied text edit did.
#[derive(Clone, Debug, Serialize)]
pub struct UpdateReport {
    pub namespace: NamespaceId,
    pub revision: u64,
    pub summary: ChangeSummary,
    pub applied: AppliedChangeSet,
    /// Id of the audit record, or `None` when nothing changed.
    pub audit_id: Option<Uuid>,
}

/// Edits configuration namespaces as text.
///
/// Every edit follows the same path: snapshot the namespace, reconcile the
/// text against the snapshot, and apply the change set at the snapshot's
/// revision. A concurrent edit that lands in between makes the apply fail
/// with a stale-baseline error; the caller decides whether to retry.
pub struct ConfigService {
    store: Arc<dyn ItemStore>,
    audit: Arc<dyn AuditSink>,
    resolver: PropertiesResolver,
    config: SdkConfig,
}

impl ConfigService {
    /// A service that audits through `tracing`.
    pub fn new(store: Arc<dyn ItemStore>, config: SdkConfig) -> Self {
        Self::with_audit(store, Arc::new(TracingAudit), config)
    }

    pub fn with_audit(store: Arc<dyn ItemStore>, audit: Arc<dyn AuditSink>, config: SdkConfig) -> Self {
        Self {
            store,
            audit,
            resolver: PropertiesResolver,
            config,
        }
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn store(&self) -> &dyn ItemStore {
        self.store.as_ref()
    }

    // ---- Namespace registry ----

    /// Register a namespace, or return the existing one with the same
    /// coordinates.
    pub fn register_namespace(&self, app_id: &str, cluster: &str, name: &str) -> SdkResult<NamespaceInfo> {
        if let Some(existing) = self.store.find_namespace(app_id, cluster, name)? {
            return Ok(existing);
        }
        Ok(self.store.create_namespace(app_id, cluster, name)?)
    }

    pub fn namespaces(&self) -> SdkResult<Vec<NamespaceInfo>> {
        Ok(self.store.namespaces()?)
    }

    fn namespace_info(&self, namespace: NamespaceId) -> SdkResult<NamespaceInfo> {
        self.store
            .namespace(namespace)?
            .ok_or(SdkError::NamespaceNotFound(namespace))
    }

    // ---- Text operations ----

    /// Render the current items of a namespace as text.
    pub fn render_namespace(&self, namespace: NamespaceId) -> SdkResult<String> {
        let baseline = self.store.snapshot(namespace)?;
        Ok(render(&baseline.items))
    }

    /// Compute the change set for `text` without applying it.
    pub fn plan(&self, namespace: NamespaceId, text: &str) -> SdkResult<Plan> {
        self.check_editable(namespace, text)?;
        let baseline = self.store.snapshot(namespace)?;
        let changes = self.resolver.resolve(namespace, text, &baseline.items)?;
        debug!(namespace = %namespace, summary = %changes.summary(), "plan computed");

        Ok(Plan {
            namespace,
            base_revision: baseline.revision,
            preview: preview(&render(&baseline.items), text),
            changes,
        })
    }

    /// Replace the contents of a namespace with `text`.
    pub fn update_by_text(&self, namespace: NamespaceId, text: &str) -> SdkResult<UpdateReport> {
        self.check_editable(namespace, text)?;
        let baseline = self.store.snapshot(namespace)?;
        let changes = self
            .resolver
            .resolve(namespace, text, &baseline.items)?
            .with_modified_by(self.config.operator.clone());
        let summary = changes.summary();

        if changes.is_empty() {
            debug!(namespace = %namespace, revision = baseline.revision, "text matches namespace");
            return Ok(UpdateReport {
                namespace,
                revision: baseline.revision,
                summary,
                applied: AppliedChangeSet {
                    namespace,
                    revision: baseline.revision,
                    created: Vec::new(),
                    updated: 0,
                    deleted: 0,
                },
                audit_id: None,
            });
        }

        let applied = self.store.apply(namespace, baseline.revision, &changes)?;

        let record = AuditRecord {
            id: Uuid::now_v7(),
            namespace,
            operator: self.config.operator.clone(),
            env: self.config.env.clone(),
            at: Utc::now(),
            revision: applied.revision,
            creates: summary.creates,
            updates: summary.updates,
            deletes: summary.deletes,
        };
        self.audit.record(&record);

        info!(
            namespace = %namespace,
            revision = applied.revision,
            summary = %summary,
            "namespace updated by text"
        );

        Ok(UpdateReport {
            namespace,
            revision: applied.revision,
            summary,
            applied,
            audit_id: Some(record.id),
        })
    }

    /// Import an uploaded file named `app+cluster+namespace.format`.
    ///
    /// The namespace must already be registered.
    pub fn import_text(&self, file_name: &str, text: &str) -> SdkResult<UpdateReport> {
        let target = self.check_import(file_name, text)?;
        let info = self
            .store
            .find_namespace(&target.app_id, &target.cluster, &target.namespace)?
            .ok_or_else(|| SdkError::UnknownTarget(target.to_string()))?;
        debug!(file = file_name, namespace = %info.id, "importing config file");
        self.update_by_text(info.id, text)
    }

    /// Import an uploaded file, registering its namespace first if needed.
    ///
    /// The upload is checked before anything is registered, so a rejected
    /// file leaves the registry as it was.
    pub fn import_or_register(&self, file_name: &str, text: &str) -> SdkResult<UpdateReport> {
        let target = self.check_import(file_name, text)?;
        let info = self.register_namespace(&target.app_id, &target.cluster, &target.namespace)?;
        debug!(file = file_name, namespace = %info.id, "importing config file");
        self.update_by_text(info.id, text)
    }

    /// Checks that need only the file name and content.
    fn check_import(&self, file_name: &str, text: &str) -> SdkResult<ImportTarget> {
        let target = if self.config.allow_empty_import {
            ImportTarget::parse(file_name)?
        } else {
            check_upload(file_name, text.as_bytes())?
        };
        if !target.format.is_line_based() {
            return Err(SdkError::UnsupportedFormat(target.format));
        }
        self.check_size(text)?;
        Document::parse(text)?;
        Ok(target)
    }

    fn check_size(&self, text: &str) -> SdkResult<()> {
        if text.len() > self.config.max_text_bytes {
            return Err(SdkError::TextTooLarge {
                size: text.len(),
                limit: self.config.max_text_bytes,
            });
        }
        Ok(())
    }

    fn check_editable(&self, namespace: NamespaceId, text: &str) -> SdkResult<()> {
        self.check_size(text)?;
        let info = self.namespace_info(namespace)?;
        let format = namespace_format(&info.name);
        if !format.is_line_based() {
            return Err(SdkError::UnsupportedFormat(format));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ConfigService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// The format of a namespace, from the suffix of its name. Names without a
/// known suffix are properties namespaces.
pub fn namespace_format(name: &str) -> ConfigFileFormat {
    name.rsplit_once('.')
        .and_then(|(_, suffix)| suffix.parse().ok())
        .unwrap_or(ConfigFileFormat::Properties)
}
