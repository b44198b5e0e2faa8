use atelier::catalog::CatalogQuery;
use atelier::pricing::format_inr;
use atelier::shared::Selection;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::selection_form::SelectionFormDialog;
use crate::auth::use_auth;
use crate::components::icons::{Pencil, Plus, Trash};
use crate::confirm::use_confirm;
use crate::notify::use_notifier;

#[component]
pub fn AdminSelections() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();
    let confirm = use_confirm();
    let media = auth.media();

    let selections = RwSignal::new(Vec::<Selection>::new());
    let loading = RwSignal::new(true);
    let dialog_open = RwSignal::new(false);
    let editing = RwSignal::new(Option::<Selection>::None);

    let reload = move || {
        spawn_local(async move {
            match auth.api().selections(&CatalogQuery::default()).await {
                Ok(list) => selections.set(list),
                Err(e) => tracing::error!(error = %e, "failed to fetch selections"),
            }
            loading.set(false);
        });
    };
    reload();

    let open_form = move |target: Option<Selection>| {
        editing.set(target);
        dialog_open.set(true);
    };

    let on_delete = move |id: String| {
        confirm.confirm("Delete this item?", move || {
            spawn_local(async move {
                match auth.api().delete_selection(&id).await {
                    Ok(()) => {
                        reload();
                        notifier.success("Selection deleted");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, %id, "delete selection failed");
                        notifier.error("Failed to delete. Please try again.");
                    }
                }
            });
        });
    };

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-serif">"Manage Selections"</h2>
                <button class="btn btn-primary btn-sm gap-2" on:click=move |_| open_form(None)>
                    <Plus attr:class="h-4 w-4" />
                    "Add New"
                </button>
            </div>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="flex justify-center py-8"><span class="loading loading-spinner"></span></div> }
            >
                <div class="space-y-2">
                    <For
                        each=move || selections.get()
                        key=|s| s.id.clone()
                        children={
                            let media = media.clone();
                            move |item| {
                                let photo = media.primary_photo(&item);
                                let extra = item.gallery().len().saturating_sub(1);
                                let id = item.id.clone();
                                let target = item.clone();
                                view! {
                                    <div class="flex items-center gap-4 p-3 bg-base-100 rounded-box shadow-sm">
                                        <div class="relative">
                                            <img src=photo alt="" class="w-16 h-20 object-cover rounded" />
                                            {(extra > 0).then(|| view! {
                                                <span class="badge badge-neutral badge-xs absolute bottom-1 right-1">"+" {extra}</span>
                                            })}
                                        </div>
                                        <div class="flex-1">
                                            <h4 class="font-medium">{item.name.clone()}</h4>
                                            <p class="text-sm opacity-60">
                                                {format_inr(item.price as f64)} " | SKU: " {item.sku.clone().unwrap_or_default()}
                                            </p>
                                        </div>
                                        <div class="flex gap-1">
                                            <button class="btn btn-ghost btn-sm" on:click=move |_| open_form(Some(target.clone()))>
                                                <Pencil attr:class="h-4 w-4" />
                                            </button>
                                            <button class="btn btn-ghost btn-sm text-error" on:click=move |_| on_delete(id.clone())>
                                                <Trash attr:class="h-4 w-4" />
                                            </button>
                                        </div>
                                    </div>
                                }
                            }
                        }
                    />
                </div>
                <Show when=move || selections.with(Vec::is_empty)>
                    <p class="text-center py-8 opacity-60">"No items found. Click \"Add New\" to create one."</p>
                </Show>
            </Show>

            <SelectionFormDialog open=dialog_open editing=editing on_saved=move |_| reload() />
        </div>
    }
}
