//! Knowledge base
//!
//! Documents the voice agent answers from. Every add or delete re-fetches
//! the whole list.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::json;

use super::notice::record_failure;
use super::table::{format_timestamp, Table};
use super::{compose, forms, require_business, Notice, View, ViewResult, ViewScope};
use crate::api::{ApiClient, KnowledgeDoc, NewKnowledgeDoc};
use crate::router::Route;

/// New document being typed in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocDraft {
    pub title: String,
    pub content: String,
}

impl DocDraft {
    pub fn to_request(&self) -> Result<NewKnowledgeDoc, forms::FormError> {
        Ok(NewKnowledgeDoc {
            title: forms::required("title", &self.title)?.to_string(),
            content: forms::required("content", &self.content)?.to_string(),
        })
    }
}

#[derive(Debug)]
pub struct KnowledgeBaseView {
    client: ApiClient,
    scope: ViewScope,
    docs: Vec<KnowledgeDoc>,
    pub draft: DocDraft,
    notice: Option<Notice>,
}

impl KnowledgeBaseView {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            scope: ViewScope::new(),
            docs: Vec::new(),
            draft: DocDraft::default(),
            notice: None,
        }
    }

    pub fn docs(&self) -> &[KnowledgeDoc] {
        &self.docs
    }

    /// Create a document from the draft, then reload
    pub async fn add(&mut self) -> ViewResult<()> {
        self.notice = None;
        let result = self.try_add().await;
        record_failure(&mut self.notice, &result);
        result
    }

    /// Delete a document, then reload
    pub async fn delete(&mut self, doc_id: &str) -> ViewResult<()> {
        self.notice = None;
        let result = self.try_delete(doc_id).await;
        record_failure(&mut self.notice, &result);
        result
    }

    async fn try_add(&mut self) -> ViewResult<()> {
        let request = self.draft.to_request()?;
        let business_id = require_business(&self.client)?;

        let api = self.client.business(&business_id);
        let created = self.scope.run(api.add_knowledge_doc(&request)).await??;
        tracing::info!(doc_id = %created.id, "Knowledge document added");

        self.draft = DocDraft::default();
        self.reload(&business_id).await
    }

    async fn try_delete(&mut self, doc_id: &str) -> ViewResult<()> {
        let business_id = require_business(&self.client)?;

        let api = self.client.business(&business_id);
        self.scope.run(api.delete_knowledge_doc(doc_id)).await??;
        tracing::info!(%doc_id, "Knowledge document deleted");

        self.reload(&business_id).await
    }

    async fn reload(&mut self, business_id: &str) -> ViewResult<()> {
        let api = self.client.business(business_id);
        self.docs = self.scope.run(api.knowledge_docs()).await??;
        Ok(())
    }
}

#[async_trait(?Send)]
impl View for KnowledgeBaseView {
    fn route(&self) -> Route {
        Route::KnowledgeBase
    }

    async fn mount(&mut self) -> ViewResult<()> {
        self.notice = None;
        let result = match self.client.session().business_id() {
            Some(business_id) => self.reload(&business_id).await,
            None => Ok(()),
        };
        record_failure(&mut self.notice, &result);
        result
    }

    fn render(&self) -> String {
        let body = if self.docs.is_empty() {
            "No documents yet.\n".to_string()
        } else {
            let mut table = Table::new(["ID", "Title", "Content", "Added"]);
            for doc in &self.docs {
                table.row([
                    doc.id.clone(),
                    doc.title.clone(),
                    forms::preview(&doc.content).replace('\n', " "),
                    format_timestamp(&doc.created_at),
                ]);
            }
            table.render()
        };
        compose("Knowledge Base", self.notice.as_ref(), &body)
    }

    fn snapshot(&self) -> serde_json::Value {
        let docs: Vec<_> = self
            .docs
            .iter()
            .map(|doc| {
                json!({
                    "id": doc.id,
                    "title": doc.title,
                    "preview": forms::preview(&doc.content),
                    "created_at": doc.created_at,
                })
            })
            .collect();

        json!({
            "route": self.route().path(),
            "docs": docs,
            "notice": self.notice,
        })
    }

    fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    fn scope(&self) -> &ViewScope {
        &self.scope
    }
}
