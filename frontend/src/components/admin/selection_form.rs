//! 商品新建/编辑对话框
//!
//! 表单字段整合在 `SelectionFormState` 中，打开对话框时按"新建"或"编辑"重置。

use atelier::admin::{self, BOTTOM_SIZE_PRESETS, TOP_SIZE_PRESETS};
use atelier::shared::{Category, Selection, SelectionDraft};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{picked_file, upload_image};
use crate::auth::use_auth;
use crate::components::icons::{Close, Plus, Trash};
use crate::notify::use_notifier;

#[derive(Debug, Clone, Copy)]
enum SizeField {
    Top,
    Bottom,
}

impl SizeField {
    fn presets(self) -> &'static [&'static str] {
        match self {
            SizeField::Top => &TOP_SIZE_PRESETS,
            SizeField::Bottom => &BOTTOM_SIZE_PRESETS,
        }
    }

    fn values(self, draft: &SelectionDraft) -> &[String] {
        match self {
            SizeField::Top => &draft.top_sizes,
            SizeField::Bottom => &draft.bottom_sizes,
        }
    }

    fn values_mut(self, draft: &mut SelectionDraft) -> &mut Vec<String> {
        match self {
            SizeField::Top => &mut draft.top_sizes,
            SizeField::Bottom => &mut draft.bottom_sizes,
        }
    }
}

/// 表单状态
///
/// 价格以原始字符串保存，提交时再解析，避免输入过程中被改写。
#[derive(Clone, Copy)]
struct SelectionFormState {
    draft: RwSignal<SelectionDraft>,
    price: RwSignal<String>,
    color_input: RwSignal<String>,
}

impl SelectionFormState {
    fn new() -> Self {
        Self {
            draft: RwSignal::new(SelectionDraft::default()),
            price: RwSignal::new(String::new()),
            color_input: RwSignal::new(String::new()),
        }
    }

    /// 新建时留一个空图片位；编辑时带出已有字段
    fn reset(&self, editing: Option<&Selection>) {
        let mut draft = editing.map(SelectionDraft::from).unwrap_or_default();
        if draft.photos.is_empty() {
            draft.photos.push(String::new());
        }
        self.price
            .set(editing.map(|s| s.price.to_string()).unwrap_or_default());
        self.draft.set(draft);
        self.color_input.set(String::new());
    }

    fn to_draft(&self) -> SelectionDraft {
        let mut draft = self.draft.get_untracked();
        draft.price = self.price.with_untracked(|p| p.trim().parse().unwrap_or(0));
        draft
    }

    fn set_photo(&self, index: usize, url: String) {
        self.draft.update(|d| {
            if let Some(slot) = d.photos.get_mut(index) {
                *slot = url;
            }
        });
    }

    fn add_colors(&self) {
        let typed = self.color_input.get_untracked();
        self.draft.update(|d| {
            for color in admin::split_list(&typed) {
                if !d.colors.contains(&color) {
                    d.colors.push(color);
                }
            }
        });
        self.color_input.set(String::new());
    }
}

#[component]
pub fn SelectionFormDialog(
    open: RwSignal<bool>,
    /// 要编辑的商品；None 表示新建
    editing: RwSignal<Option<Selection>>,
    #[prop(into)] on_saved: Callback<()>,
) -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();
    let media = auth.media();

    let state = SelectionFormState::new();
    let categories = RwSignal::new(Vec::<Category>::new());
    let (saving, set_saving) = signal(false);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    // 打开时重置表单并拉取分类
    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        let current = editing.get_untracked();
        state.reset(current.as_ref());
        let is_new = current.is_none();
        spawn_local(async move {
            match auth.api().categories().await {
                Ok(list) => {
                    if is_new {
                        if let Some(first) = list.first() {
                            let name = first.name.clone();
                            state.draft.update(|d| {
                                if d.category.is_empty() {
                                    d.category = name;
                                }
                            });
                        }
                    }
                    categories.set(list);
                }
                Err(e) => tracing::error!(error = %e, "failed to fetch categories"),
            }
        });
    });

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_upload = move |index: usize, ev: web_sys::Event| {
        let Some(file) = picked_file(&ev) else {
            return;
        };
        spawn_local(async move {
            match upload_image(auth, file).await {
                Ok(url) => {
                    state.set_photo(index, url);
                    notifier.success("Image uploaded!");
                }
                Err(e) => {
                    tracing::error!(error = %e, "selection image upload failed");
                    notifier.error("Upload failed");
                }
            }
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = match admin::validate_selection(&state.to_draft()) {
            Ok(draft) => draft,
            Err(e) => {
                notifier.error(e.to_string());
                return;
            }
        };
        set_saving.set(true);
        let target = editing.get_untracked().map(|s| s.id);
        spawn_local(async move {
            let api = auth.api();
            let result = match &target {
                Some(id) => api.update_selection(id, &draft).await,
                None => api.create_selection(&draft).await,
            };
            match result {
                Ok(()) => {
                    notifier.success(if target.is_some() {
                        "Selection updated successfully"
                    } else {
                        "Selection created successfully"
                    });
                    on_saved.run(());
                    open.set(false);
                }
                Err(e) => {
                    tracing::error!(error = %e, "save selection failed");
                    let fallback = if target.is_some() {
                        "Failed to update item"
                    } else {
                        "Failed to create item"
                    };
                    notifier.error(e.user_message(fallback));
                }
            }
            set_saving.set(false);
        });
    };

    let size_chips = move |field: SizeField| {
        field
            .presets()
            .iter()
            .map(|size| {
                let size = *size;
                view! {
                    <button
                        type="button"
                        class=move || {
                            let chosen = state.draft.with(|d| field.values(d).iter().any(|s| s == size));
                            if chosen { "btn btn-xs btn-primary" } else { "btn btn-xs btn-outline" }
                        }
                        on:click=move |_| state.draft.update(|d| admin::toggle_value(field.values_mut(d), size))
                    >
                        {size}
                    </button>
                }
            })
            .collect_view()
    };

    let photo_slots = move || {
        let photos = state.draft.with(|d| d.photos.clone());
        let removable = photos.len() > 1;
        photos
            .into_iter()
            .enumerate()
            .map(|(index, photo)| {
                if photo.is_empty() {
                    view! {
                        <div class="border border-dashed border-base-300 rounded-box p-4 space-y-2">
                            <input
                                type="file"
                                accept="image/*"
                                class="file-input file-input-bordered file-input-sm w-full"
                                on:change=move |ev| on_upload(index, ev)
                            />
                            <div class="divider text-xs my-1">"OR"</div>
                            <input
                                type="text"
                                class="input input-bordered input-sm w-full"
                                placeholder="Paste Image URL"
                                on:change=move |ev| state.set_photo(index, event_target_value(&ev))
                            />
                        </div>
                    }
                    .into_any()
                } else {
                    view! {
                        <div class="relative">
                            <img src=media.secure_url(&photo) alt=format!("Product {}", index + 1) class="w-full h-40 object-cover rounded-box" />
                            <div class="absolute top-2 right-2 flex gap-1">
                                <button type="button" class="btn btn-xs" on:click=move |_| state.set_photo(index, String::new())>
                                    "Change"
                                </button>
                                <Show when=move || removable>
                                    <button
                                        type="button"
                                        class="btn btn-xs btn-error"
                                        on:click=move |_| state.draft.update(|d| {
                                            if index < d.photos.len() {
                                                d.photos.remove(index);
                                            }
                                        })
                                    >
                                        <Trash attr:class="h-3 w-3" />
                                    </button>
                                </Show>
                            </div>
                        </div>
                    }
                    .into_any()
                }
            })
            .collect_view()
    };

    view! {
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| open.set(false)>
            <div class="modal-box max-w-4xl">
                <div class="flex items-start justify-between mb-4">
                    <div>
                        <h3 class="font-bold text-lg">
                            {move || if editing.with(Option::is_some) { "Edit Collection Item" } else { "New Collection Item" }}
                        </h3>
                        <p class="text-sm opacity-60">
                            {move || match editing.get() {
                                Some(s) => format!("Editing SKU: {}", s.sku.unwrap_or_default()),
                                None => "Add a new piece to the collection".to_string(),
                            }}
                        </p>
                    </div>
                    <button type="button" class="btn btn-sm btn-circle btn-ghost" on:click=move |_| open.set(false)>
                        <Close attr:class="h-5 w-5" />
                    </button>
                </div>

                <form id="selection-form" class="grid md:grid-cols-2 gap-6" on:submit=on_submit>
                    // 左侧：基本信息与变体
                    <div class="space-y-4">
                        <h4 class="font-semibold">"Basic Information"</h4>
                        <label class="form-control">
                            <span class="label-text mb-1">"Item Name"</span>
                            <input
                                type="text"
                                class="input input-bordered"
                                placeholder="e.g. Royal Blue Sherwani"
                                required
                                prop:value=move || state.draft.with(|d| d.name.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    state.draft.update(|d| d.name = value);
                                }
                            />
                        </label>
                        <div class="grid grid-cols-2 gap-4">
                            <label class="form-control">
                                <span class="label-text mb-1">"Category"</span>
                                <select
                                    class="select select-bordered"
                                    on:change=move |ev| {
                                        let value = event_target_value(&ev);
                                        state.draft.update(|d| d.category = value);
                                    }
                                >
                                    <option value="">"Select Category"</option>
                                    <For
                                        each=move || categories.get()
                                        key=|c| c.id.clone()
                                        children=move |c| {
                                            let name = c.name.clone();
                                            let current = name.clone();
                                            view! {
                                                <option
                                                    value=name.clone()
                                                    selected=move || state.draft.with(|d| d.category == current)
                                                >
                                                    {name}
                                                </option>
                                            }
                                        }
                                    />
                                </select>
                            </label>
                            <label class="form-control">
                                <span class="label-text mb-1">"SKU Code"</span>
                                <input
                                    type="text"
                                    class="input input-bordered"
                                    placeholder="e.g. WED-001"
                                    prop:value=move || state.draft.with(|d| d.sku.clone())
                                    on:input=move |ev| {
                                        let value = event_target_value(&ev);
                                        state.draft.update(|d| d.sku = value);
                                    }
                                />
                            </label>
                        </div>
                        <label class="form-control">
                            <span class="label-text mb-1">"Price (₹)"</span>
                            <input
                                type="number"
                                min="0"
                                class="input input-bordered"
                                placeholder="0"
                                required
                                prop:value=move || state.price.get()
                                on:input=move |ev| state.price.set(event_target_value(&ev))
                            />
                        </label>
                        <label class="form-control">
                            <span class="label-text mb-1">"Description"</span>
                            <textarea
                                class="textarea textarea-bordered"
                                rows="3"
                                prop:value=move || state.draft.with(|d| d.description.clone())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    state.draft.update(|d| d.description = value);
                                }
                            ></textarea>
                        </label>

                        <div>
                            <span class="label-text">"Top Sizes"</span>
                            <div class="flex flex-wrap gap-1 mt-1">
                                {size_chips(SizeField::Top)}
                            </div>
                        </div>
                        <div>
                            <span class="label-text">"Bottom Sizes"</span>
                            <div class="flex flex-wrap gap-1 mt-1">
                                {size_chips(SizeField::Bottom)}
                            </div>
                        </div>
                        <div>
                            <span class="label-text">"Colors"</span>
                            <div class="join w-full mt-1">
                                <input
                                    type="text"
                                    class="input input-bordered input-sm join-item flex-1"
                                    placeholder="Add a color (e.g. Navy Blue)"
                                    prop:value=move || state.color_input.get()
                                    on:input=move |ev| state.color_input.set(event_target_value(&ev))
                                    on:keydown=move |ev: web_sys::KeyboardEvent| {
                                        if ev.key() == "Enter" {
                                            ev.prevent_default();
                                            state.add_colors();
                                        }
                                    }
                                />
                                <button type="button" class="btn btn-sm join-item" on:click=move |_| state.add_colors()>
                                    "Add"
                                </button>
                            </div>
                            <div class="flex flex-wrap gap-1 mt-2">
                                {move || {
                                    state
                                        .draft
                                        .with(|d| d.colors.clone())
                                        .into_iter()
                                        .map(|color| {
                                            let target = color.clone();
                                            view! {
                                                <span class="badge badge-outline gap-1">
                                                    {color}
                                                    <button
                                                        type="button"
                                                        on:click=move |_| state.draft.update(|d| d.colors.retain(|c| *c != target))
                                                    >
                                                        <Close attr:class="h-3 w-3" />
                                                    </button>
                                                </span>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </div>
                        </div>
                    </div>

                    // 右侧：图片
                    <div class="space-y-3">
                        <h4 class="font-semibold">"Product Images"</h4>
                        {photo_slots}
                        <button
                            type="button"
                            class="btn btn-outline btn-sm w-full gap-2"
                            on:click=move |_| state.draft.update(|d| d.photos.push(String::new()))
                        >
                            <Plus attr:class="h-4 w-4" />
                            "Another Photo"
                        </button>
                    </div>
                </form>

                <div class="modal-action">
                    <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>"Cancel"</button>
                    <button type="submit" form="selection-form" class="btn btn-primary" disabled=move || saving.get()>
                        <Show when=move || saving.get()>
                            <span class="loading loading-spinner"></span>
                        </Show>
                        {move || if editing.with(Option::is_some) { "Update Item" } else { "Create Item" }}
                    </button>
                </div>
            </div>
        </dialog>
    }
}
