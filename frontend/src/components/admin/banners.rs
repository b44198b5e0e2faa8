use atelier::admin::validate_banner;
use atelier::shared::{Banner, BannerDraft};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{picked_file, upload_image};
use crate::auth::use_auth;
use crate::components::icons::Trash;
use crate::confirm::use_confirm;
use crate::notify::use_notifier;

fn empty_draft() -> BannerDraft {
    BannerDraft {
        is_active: true,
        ..Default::default()
    }
}

/// 横幅管理：上传图片后添加，列表支持删除
#[component]
pub fn AdminBanners() -> impl IntoView {
    let auth = use_auth();
    let notifier = use_notifier();
    let confirm = use_confirm();
    let media = auth.media();

    let banners = RwSignal::new(Vec::<Banner>::new());
    let loading = RwSignal::new(true);
    let draft = RwSignal::new(empty_draft());
    let busy = RwSignal::new(false);

    let reload = move || {
        spawn_local(async move {
            match auth.api().banners().await {
                Ok(list) => banners.set(list),
                Err(e) => tracing::error!(error = %e, "failed to fetch banners"),
            }
            loading.set(false);
        });
    };
    reload();

    let on_upload = move |ev: web_sys::Event| {
        let Some(file) = picked_file(&ev) else {
            return;
        };
        busy.set(true);
        spawn_local(async move {
            match upload_image(auth, file).await {
                Ok(url) => {
                    draft.update(|d| d.image = url);
                    notifier.success("Image uploaded");
                }
                Err(e) => {
                    tracing::error!(error = %e, "banner upload failed");
                    notifier.error("Upload failed");
                }
            }
            busy.set(false);
        });
    };

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let payload = match draft.with_untracked(validate_banner) {
            Ok(payload) => payload,
            Err(e) => {
                notifier.error(e.to_string());
                return;
            }
        };
        busy.set(true);
        spawn_local(async move {
            match auth.api().create_banner(&payload).await {
                Ok(()) => {
                    draft.set(empty_draft());
                    notifier.success("Banner added");
                    reload();
                }
                Err(e) => {
                    tracing::error!(error = %e, "create banner failed");
                    notifier.error("Failed to add banner");
                }
            }
            busy.set(false);
        });
    };

    let on_delete = move |id: String| {
        confirm.confirm("Delete this banner?", move || {
            spawn_local(async move {
                match auth.api().delete_banner(&id).await {
                    Ok(()) => {
                        banners.update(|list| list.retain(|b| b.id != id));
                        notifier.success("Banner deleted");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, %id, "delete banner failed");
                        notifier.error("Failed to delete");
                    }
                }
            });
        });
    };

    let preview = {
        let media = media.clone();
        move || draft.with(|d| media.secure_url(&d.image))
    };

    view! {
        <div class="space-y-6">
            <h2 class="text-2xl font-serif">"Manage Banners"</h2>

            <form class="card bg-base-100 shadow" on:submit=on_add>
                <div class="card-body grid md:grid-cols-3 gap-4 items-end">
                    <label class="form-control">
                        <span class="label-text mb-1">"Title (Optional)"</span>
                        <input
                            type="text"
                            class="input input-bordered"
                            placeholder="e.g. Summer Collection"
                            prop:value=move || draft.with(|d| d.title.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                draft.update(|d| d.title = value);
                            }
                        />
                    </label>
                    <label class="form-control">
                        <span class="label-text mb-1">"Banner Image"</span>
                        <input
                            type="file"
                            accept="image/*"
                            class="file-input file-input-bordered w-full"
                            disabled=move || busy.get()
                            on:change=on_upload
                        />
                    </label>
                    <button type="submit" class="btn btn-primary" disabled=move || busy.get() || draft.with(|d| d.image.is_empty())>
                        {move || if busy.get() { "Processing..." } else { "Add Banner" }}
                    </button>
                    <Show when=move || draft.with(|d| !d.image.is_empty())>
                        <img src=preview.clone() alt="Preview" class="md:col-span-3 h-32 w-full object-cover rounded-box" />
                    </Show>
                </div>
            </form>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="flex justify-center py-8"><span class="loading loading-spinner"></span></div> }
            >
                <div class="grid md:grid-cols-2 gap-4">
                    <For
                        each=move || banners.get()
                        key=|b| b.id.clone()
                        children={
                            let media = media.clone();
                            move |banner| {
                                let id = banner.id.clone();
                                view! {
                                    <div class="card image-full shadow">
                                        <figure>
                                            <img src=media.secure_url(&banner.image) alt="Banner" class="h-40 w-full object-cover" />
                                        </figure>
                                        <div class="card-body justify-between">
                                            <h3 class="card-title">{banner.title.clone().unwrap_or_default()}</h3>
                                            <div class="card-actions justify-end">
                                                <button class="btn btn-error btn-sm" on:click=move |_| on_delete(id.clone())>
                                                    <Trash attr:class="h-4 w-4" />
                                                </button>
                                            </div>
                                        </div>
                                    </div>
                                }
                            }
                        }
                    />
                </div>
                <Show when=move || banners.with(Vec::is_empty)>
                    <p class="text-center py-8 opacity-60">"No banners yet."</p>
                </Show>
            </Show>
        </div>
    }
}
