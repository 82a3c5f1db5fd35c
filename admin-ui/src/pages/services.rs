//! Services Page
//!
//! The catalogue the voice agent books from. One form serves both adding a
//! service and editing an existing one.

use leptos::*;
use voiceagent_admin::views::services::format_price;
use voiceagent_admin::views::{ServiceDraft, ServicesView};
use voiceagent_admin::{Service, View, ViewError, ViewResult};

use super::{page_scope, Field, BUTTON_CLASS};
use crate::components::ListSkeleton;
use crate::state::expect_state;

/// What the form submits
#[derive(Clone, Debug, PartialEq)]
enum Editing {
    New,
    Existing(String),
}

/// Services page component
#[component]
pub fn Services() -> impl IntoView {
    let state = expect_state();
    let scope = page_scope();

    let services = create_rw_signal(None::<Vec<Service>>);
    let name = create_rw_signal(String::new());
    let description = create_rw_signal(String::new());
    let duration = create_rw_signal(ServiceDraft::default().duration_minutes);
    let price = create_rw_signal(String::new());
    let editing = create_rw_signal(Editing::New);
    let busy = create_rw_signal(false);

    let fill = move |draft: ServiceDraft| {
        name.set(draft.name);
        description.set(draft.description);
        duration.set(draft.duration_minutes);
        price.set(draft.price);
    };

    let draft = move || ServiceDraft {
        name: name.get_untracked(),
        description: description.get_untracked(),
        duration_minutes: duration.get_untracked(),
        price: price.get_untracked(),
    };

    // Run one controller operation; the refreshed list lands in `services`
    let perform = {
        let (state, scope) = (state.clone(), scope.clone());
        move |op: Op| {
            busy.set(true);
            let (state, scope) = (state.clone(), scope.clone());
            spawn_local(async move {
                let mut catalogue = ServicesView::new(state.client.clone());
                let result: ViewResult<ViewResult<()>> = match &op {
                    Op::Load => scope.run(catalogue.mount()).await,
                    Op::Add(draft) => {
                        catalogue.draft = draft.clone();
                        scope.run(catalogue.add()).await
                    }
                    Op::Update(id, draft) => match draft.to_update() {
                        Ok(update) => scope.run(catalogue.update(id, &update)).await,
                        Err(e) => Ok(Err(e.into())),
                    },
                    Op::Delete(id) => scope.run(catalogue.delete(id)).await,
                };

                match result.and_then(|outcome| outcome) {
                    Ok(()) => {
                        services.set(Some(catalogue.services().to_vec()));
                        if !matches!(op, Op::Load | Op::Delete(_)) {
                            fill(ServiceDraft::default());
                            editing.set(Editing::New);
                        }
                    }
                    Err(ViewError::Cancelled) => return,
                    Err(e) => {
                        state.report(&e);
                        if matches!(op, Op::Load) {
                            services.set(Some(Vec::new()));
                        }
                    }
                }
                busy.set(false);
            });
        }
    };

    perform(Op::Load);

    let submit = {
        let perform = perform.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();
            match editing.get_untracked() {
                Editing::New => perform(Op::Add(draft())),
                Editing::Existing(id) => perform(Op::Update(id, draft())),
            }
        }
    };

    let cancel_edit = move |_| {
        fill(ServiceDraft::default());
        editing.set(Editing::New);
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Services"</h1>
                <p class="text-gray-400 mt-1">"What callers can book"</p>
            </div>

            <form on:submit=submit class="bg-gray-800 rounded-xl p-6 space-y-4">
                <h2 class="text-xl font-semibold">
                    {move || match editing.get() {
                        Editing::New => "Add Service",
                        Editing::Existing(_) => "Edit Service",
                    }}
                </h2>
                <Field label="Name" value=name />
                <Field label="Description" value=description />
                <div class="grid grid-cols-2 gap-4">
                    <Field label="Duration (minutes)" value=duration input_type="number" />
                    <Field label="Price" value=price input_type="number" />
                </div>
                <div class="flex space-x-2">
                    <button type="submit" disabled=move || busy.get() class=BUTTON_CLASS>
                        {move || match editing.get() {
                            Editing::New => "Add Service",
                            Editing::Existing(_) => "Update Service",
                        }}
                    </button>
                    <Show when=move || editing.get() != Editing::New>
                        <button
                            type="button"
                            on:click=cancel_edit
                            class="px-4 py-3 bg-gray-600 hover:bg-gray-500 rounded-lg font-medium"
                        >
                            "Cancel"
                        </button>
                    </Show>
                </div>
            </form>

            <section class="bg-gray-800 rounded-xl p-6">
                {move || match services.get() {
                    None => view! { <ListSkeleton /> }.into_view(),
                    Some(list) if list.is_empty() => view! {
                        <p class="text-gray-400">"No services yet."</p>
                    }.into_view(),
                    Some(list) => view! {
                        <table class="w-full text-left">
                            <thead class="text-sm text-gray-400">
                                <tr>
                                    <th class="py-2">"Name"</th>
                                    <th class="py-2">"Duration"</th>
                                    <th class="py-2">"Price"</th>
                                    <th class="py-2">"Description"</th>
                                    <th />
                                </tr>
                            </thead>
                            <tbody>
                                {list.into_iter().map(|service| {
                                    let perform = perform.clone();
                                    let edit_draft = ServiceDraft::from(&service);
                                    let edit_id = service.id.clone();
                                    let delete_id = service.id.clone();
                                    view! {
                                        <tr class="border-t border-gray-700">
                                            <td class="py-3 pr-4 font-medium">{service.name}</td>
                                            <td class="py-3 pr-4">{format!("{} min", service.duration_minutes)}</td>
                                            <td class="py-3 pr-4">{format_price(service.price)}</td>
                                            <td class="py-3 pr-4 text-gray-300">
                                                {service.description.unwrap_or_else(|| "-".to_string())}
                                            </td>
                                            <td class="py-3 space-x-3 whitespace-nowrap">
                                                <button
                                                    on:click=move |_| {
                                                        fill(edit_draft.clone());
                                                        editing.set(Editing::Existing(edit_id.clone()));
                                                    }
                                                    class="text-primary-400 hover:text-primary-300"
                                                >
                                                    "Edit"
                                                </button>
                                                <button
                                                    on:click=move |_| perform(Op::Delete(delete_id.clone()))
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

/// Catalogue operations the page issues
enum Op {
    Load,
    Add(ServiceDraft),
    Update(String, ServiceDraft),
    Delete(String),
}
