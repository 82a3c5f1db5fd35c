//! Knowledge Base Page
//!
//! Documents the voice agent answers callers from. The list is re-fetched
//! after every add and delete.

use leptos::*;
use voiceagent_admin::views::forms::preview;
use voiceagent_admin::views::table::format_timestamp;
use voiceagent_admin::views::{DocDraft, KnowledgeBaseView};
use voiceagent_admin::{KnowledgeDoc, View, ViewError};

use super::{page_scope, Field, TextArea, BUTTON_CLASS};
use crate::components::ListSkeleton;
use crate::state::expect_state;

/// Knowledge base page component
#[component]
pub fn KnowledgeBase() -> impl IntoView {
    let state = expect_state();
    let scope = page_scope();

    let docs = create_rw_signal(None::<Vec<KnowledgeDoc>>);
    let title = create_rw_signal(String::new());
    let content = create_rw_signal(String::new());
    let busy = create_rw_signal(false);

    {
        let (state, scope) = (state.clone(), scope.clone());
        spawn_local(async move {
            let mut kb = KnowledgeBaseView::new(state.client.clone());
            match scope.run(kb.mount()).await.and_then(|outcome| outcome) {
                Ok(()) => docs.set(Some(kb.docs().to_vec())),
                Err(ViewError::Cancelled) => {}
                Err(e) => {
                    state.report(&e);
                    docs.set(Some(Vec::new()));
                }
            }
        });
    }

    let add = {
        let (state, scope) = (state.clone(), scope.clone());
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            busy.set(true);

            let mut kb = KnowledgeBaseView::new(state.client.clone());
            kb.draft = DocDraft {
                title: title.get_untracked(),
                content: content.get_untracked(),
            };

            let (state, scope) = (state.clone(), scope.clone());
            spawn_local(async move {
                match scope.run(kb.add()).await.and_then(|outcome| outcome) {
                    Ok(()) => {
                        docs.set(Some(kb.docs().to_vec()));
                        title.set(String::new());
                        content.set(String::new());
                    }
                    Err(ViewError::Cancelled) => return,
                    Err(e) => state.report(&e),
                }
                busy.set(false);
            });
        }
    };

    let delete = move |doc_id: String| {
        busy.set(true);
        let mut kb = KnowledgeBaseView::new(state.client.clone());
        let (state, scope) = (state.clone(), scope.clone());
        spawn_local(async move {
            match scope.run(kb.delete(&doc_id)).await.and_then(|outcome| outcome) {
                Ok(()) => docs.set(Some(kb.docs().to_vec())),
                Err(ViewError::Cancelled) => return,
                Err(e) => state.report(&e),
            }
            busy.set(false);
        });
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Knowledge Base"</h1>
                <p class="text-gray-400 mt-1">"What your voice agent knows about your business"</p>
            </div>

            <form on:submit=add class="bg-gray-800 rounded-xl p-6 space-y-4">
                <h2 class="text-xl font-semibold">"Add Document"</h2>
                <Field label="Title" value=title />
                <TextArea label="Content" value=content rows=8 />
                <button type="submit" disabled=move || busy.get() class=BUTTON_CLASS>
                    "Add Document"
                </button>
            </form>

            <section class="bg-gray-800 rounded-xl p-6">
                {move || match docs.get() {
                    None => view! { <ListSkeleton /> }.into_view(),
                    Some(list) if list.is_empty() => view! {
                        <p class="text-gray-400">"No documents yet."</p>
                    }.into_view(),
                    Some(list) => view! {
                        <table class="w-full text-left">
                            <thead class="text-sm text-gray-400">
                                <tr>
                                    <th class="py-2">"Title"</th>
                                    <th class="py-2">"Content"</th>
                                    <th class="py-2">"Added"</th>
                                    <th />
                                </tr>
                            </thead>
                            <tbody>
                                {list.into_iter().map(|doc| {
                                    let delete = delete.clone();
                                    let id = doc.id.clone();
                                    view! {
                                        <tr class="border-t border-gray-700 align-top">
                                            <td class="py-3 pr-4 font-medium">{doc.title}</td>
                                            <td class="py-3 pr-4 text-gray-300 whitespace-pre-line">
                                                {preview(&doc.content)}
                                            </td>
                                            <td class="py-3 pr-4 text-sm text-gray-400">
                                                {format_timestamp(&doc.created_at)}
                                            </td>
                                            <td class="py-3">
                                                <button
                                                    on:click=move |_| delete(id.clone())
                                                    disabled=move || busy.get()
                                                    class="text-red-400 hover:text-red-300"
                                                >
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()}
                            </tbody>
                        </table>
                    }.into_view(),
                }}
            </section>
        </div>
    }
}
