use atelier::admin::validate_category;
use atelier::shared::{Category, CategoryDraft};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{picked_file, upload_image};
use crate::auth::use_auth;
use crate::components::icons::{Close, Pencil, Trash};
use crate::confirm::use_confirm;
use crate::notify::use_notifier;

/// 分类管理：上方是新建/编辑表单，下方是列表
#[component]
pub fn AdminCategories() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();
    let confirm = use_confirm();
    let media = auth.media();

    let categories = RwSignal::new(Vec::<Category>::new());
    let loading = RwSignal::new(true);
    let form = RwSignal::new(CategoryDraft::default());
    // 正在编辑的分类 id；None 表示新建
    let editing = RwSignal::new(Option::<String>::None);
    let submitting = RwSignal::new(false);
    let uploading = RwSignal::new(false);

    let reload = move || {
        spawn_local(async move {
            match auth.api().categories().await {
                Ok(list) => categories.set(list),
                Err(e) => tracing::error!(error = %e, "failed to load categories"),
            }
            loading.set(false);
        });
    };
    reload();

    let reset = move || {
        form.set(CategoryDraft::default());
        editing.set(None);
    };

    let on_upload = move |ev: web_sys::Event| {
        let Some(file) = picked_file(&ev) else {
            return;
        };
        uploading.set(true);
        spawn_local(async move {
            match upload_image(auth, file).await {
                Ok(url) => {
                    form.update(|f| f.image = url);
                    notifier.success("Image uploaded!");
                }
                Err(e) => {
                    tracing::error!(error = %e, "category image upload failed");
                    notifier.error("Upload failed");
                }
            }
            uploading.set(false);
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = match form.with_untracked(validate_category) {
            Ok(draft) => draft,
            Err(e) => {
                notifier.error(e.to_string());
                return;
            }
        };
        submitting.set(true);
        let target = editing.get_untracked();
        spawn_local(async move {
            let api = auth.api();
            let result = match &target {
                Some(id) => api.update_category(id, &draft).await,
                None => api.create_category(&draft).await,
            };
            match (result, target.is_some()) {
                (Ok(()), true) => notifier.success("Category updated"),
                (Ok(()), false) => notifier.success("Category added"),
                (Err(e), was_editing) => {
                    tracing::error!(error = %e, "category save failed");
                    notifier.error(if was_editing { "Failed to update" } else { "Failed to add" });
                    submitting.set(false);
                    return;
                }
            }
            reload();
            reset();
            submitting.set(false);
        });
    };

    let on_toggle_featured = move |category: Category| {
        let mut draft = CategoryDraft::from(&category);
        draft.is_featured = !draft.is_featured;
        spawn_local(async move {
            match auth.api().update_category(&category.id, &draft).await {
                Ok(()) => {
                    reload();
                    notifier.success("Status updated");
                }
                Err(e) => {
                    tracing::error!(error = %e, "toggle featured failed");
                    notifier.error("Failed to update");
                }
            }
        });
    };

    let on_delete = move |id: String| {
        confirm.confirm("Delete this category?", move || {
            spawn_local(async move {
                match auth.api().delete_category(&id).await {
                    Ok(()) => {
                        reload();
                        notifier.success("Category deleted");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, %id, "delete category failed");
                        notifier.error("Failed to delete category");
                    }
                }
            });
        });
    };

    let preview = {
        let media = media.clone();
        move || form.with(|f| media.secure_url(&f.image))
    };

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-serif">"Manage Categories"</h2>

            <form class="card bg-base-100 shadow" on:submit=on_submit>
                <div class="card-body grid md:grid-cols-4 gap-4 items-end">
                    <label class="form-control">
                        <span class="label-text mb-1">
                            {move || if editing.with(Option::is_some) { "Edit Name" } else { "New Category Name" }}
                        </span>
                        <input
                            type="text"
                            class="input input-bordered"
                            placeholder="e.g. Wedding"
                            required
                            prop:value=move || form.with(|f| f.name.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                form.update(|f| f.name = value);
                            }
                        />
                    </label>

                    <div class="form-control">
                        <span class="label-text mb-1">"Cover Image"</span>
                        <Show
                            when=move || form.with(|f| !f.image.is_empty())
                            fallback=move || view! {
                                <div class="flex items-center gap-2">
                                    <input
                                        type="file"
                                        accept="image/*"
                                        class="file-input file-input-bordered file-input-sm w-full"
                                        disabled=move || uploading.get()
                                        on:change=on_upload
                                    />
                                    <Show when=move || uploading.get()>
                                        <span class="loading loading-spinner loading-sm"></span>
                                    </Show>
                                </div>
                            }
                        >
                            <div class="flex items-center gap-2">
                                <img src=preview.clone() alt="Preview" class="w-12 h-12 object-cover rounded" />
                                <button
                                    type="button"
                                    class="btn btn-ghost btn-sm"
                                    on:click=move |_| form.update(|f| f.image.clear())
                                >
                                    <Close attr:class="h-4 w-4" />
                                </button>
                            </div>
                        </Show>
                    </div>

                    <label class="label cursor-pointer justify-start gap-2">
                        <input
                            type="checkbox"
                            class="checkbox checkbox-primary"
                            prop:checked=move || form.with(|f| f.is_featured)
                            on:change=move |ev| {
                                let checked = event_target_checked(&ev);
                                form.update(|f| f.is_featured = checked);
                            }
                        />
                        <span class="label-text">"Featured on home"</span>
                    </label>

                    <div class="flex gap-2 justify-end">
                        <Show when=move || editing.with(Option::is_some)>
                            <button type="button" class="btn btn-outline" on:click=move |_| reset()>"Cancel"</button>
                        </Show>
                        <button type="submit" class="btn btn-primary" disabled=move || submitting.get() || uploading.get()>
                            {move || {
                                if submitting.get() {
                                    "Saving..."
                                } else if editing.with(Option::is_some) {
                                    "Update"
                                } else {
                                    "Add Category"
                                }
                            }}
                        </button>
                    </div>
                </div>
            </form>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="flex justify-center py-8"><span class="loading loading-spinner"></span></div> }
            >
                <div class="overflow-x-auto">
                    <table class="table">
                        <thead>
                            <tr>
                                <th>"Image"</th>
                                <th>"Name"</th>
                                <th>"Featured"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || categories.get()
                                key=|c| (c.id.clone(), c.name.clone(), c.is_featured, c.image.clone())
                                children={
                                    let media = media.clone();
                                    move |category| {
                                        let image = category.image.as_deref().map(|url| media.secure_url(url));
                                        let for_toggle = category.clone();
                                        let for_edit = category.clone();
                                        let id = category.id.clone();
                                        view! {
                                            <tr>
                                                <td>
                                                    {match image {
                                                        Some(src) => view! { <img src=src alt="" class="w-12 h-12 object-cover rounded" /> }.into_any(),
                                                        None => view! { <div class="w-12 h-12 rounded bg-base-300"></div> }.into_any(),
                                                    }}
                                                </td>
                                                <td class="font-medium">{category.name.clone()}</td>
                                                <td>
                                                    <button
                                                        class="btn btn-ghost btn-sm"
                                                        title="Toggle Featured"
                                                        on:click=move |_| on_toggle_featured(for_toggle.clone())
                                                    >
                                                        {if category.is_featured { "★" } else { "☆" }}
                                                    </button>
                                                </td>
                                                <td>
                                                    <div class="flex gap-1">
                                                        <button
                                                            class="btn btn-ghost btn-sm"
                                                            on:click=move |_| {
                                                                form.set(CategoryDraft::from(&for_edit));
                                                                editing.set(Some(for_edit.id.clone()));
                                                            }
                                                        >
                                                            <Pencil attr:class="h-4 w-4" />
                                                        </button>
                                                        <button class="btn btn-ghost btn-sm text-error" on:click=move |_| on_delete(id.clone())>
                                                            <Trash attr:class="h-4 w-4" />
                                                        </button>
                                                    </div>
                                                </td>
                                            </tr>
                                        }
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </Show>
        </div>
    }
}
