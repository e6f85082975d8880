//! Screen View Component
//!
//! Renders the active screen as nested flex boxes. Each cell lists the data
//! items its tags select. While editing, every node carries its own controls.

use data_screens_core::domain::{suggest_tags, Axis, DataItem, DomainResult, NodePath};
use data_screens_core::{LayoutNode, ScreenComposer};
use leptos::ev;
use leptos::prelude::*;

use crate::components::TagAutocomplete;
use crate::context::{use_app_context, AppContext};
use crate::store::{store_fail, use_app_store, AppStateStoreFields, AppStore};

/// Apply an edit to the active screen, reporting rejections
fn compose<T>(ctx: AppContext, store: AppStore, op: &str, f: impl FnOnce(&mut ScreenComposer) -> DomainResult<T>) {
    if let Some(Err(e)) = ctx.composer.try_update(f) {
        store_fail(&store, op, e);
    }
}

fn flex_style(axis: Option<Axis>, share: f64) -> String {
    let direction = axis.map(|a| format!("flex-direction: {};", a.as_str())).unwrap_or_default();
    format!("display: flex; flex: {} 1 0; {}", share, direction)
}

fn flex_input(ctx: AppContext, store: AppStore, path: NodePath, flex: f64) -> impl IntoView {
    view! {
        <input
            type="number"
            class="flex-input"
            min="0"
            step="any"
            title="Flex"
            prop:value=flex.to_string()
            on:change=move |e: ev::Event| {
                match event_target_value(&e).trim().parse::<f64>() {
                    Ok(flex) => compose(ctx, store, "set flex", |c| c.set_flex(&path, flex)),
                    Err(e) => store_fail(&store, "set flex", e),
                }
            }
        />
    }
}

fn name_input(ctx: AppContext, store: AppStore, path: NodePath, name: String) -> impl IntoView {
    view! {
        <input
            type="text"
            class="node-name-input"
            placeholder="Name"
            prop:value=name
            on:change=move |e: ev::Event| {
                let name = event_target_value(&e);
                compose(ctx, store, "rename", |c| c.rename_node(&path, &name));
            }
        />
    }
}

fn item_view(item: &DataItem) -> impl IntoView {
    view! {
        <li class="cell-item">
            <span class="data-item-label">{item.field1.clone()}</span>
            <span class="data-item-content">{item.field2.to_string()}</span>
        </li>
    }
}

/// Stored flex of a node; the root has none
fn node_flex(node: &LayoutNode<'_>, screen: &data_screens_core::Screen) -> f64 {
    screen.node(node.path()).map(|n| n.flex()).unwrap_or(1.0)
}

fn render_node(
    node: LayoutNode<'_>,
    screen: &data_screens_core::Screen,
    editing: bool,
    ctx: AppContext,
    store: AppStore,
) -> AnyView {
    let flex = node_flex(&node, screen);
    match node {
        LayoutNode::Container { path, name, axis, share, children } => {
            let is_root = path.is_root();
            let children = children
                .into_iter()
                .map(|child| render_node(child, screen, editing, ctx, store))
                .collect_view();
            let controls = editing.then(|| {
                let (p1, p2, p3, p4) = (path.clone(), path.clone(), path.clone(), path.clone());
                view! {
                    <div class="node-controls">
                        {(!is_root).then(|| (
                            name_input(ctx, store, p4.clone(), name.clone()),
                            flex_input(ctx, store, p4.clone(), flex),
                        ))}
                        <button type="button" on:click=move |_| compose(ctx, store, "add cell", |c| c.add_leaf(&p1))>
                            "+ cell"
                        </button>
                        <button
                            type="button"
                            on:click=move |_| compose(ctx, store, "split", |c| c.add_container(&p2, axis.flipped()))
                        >
                            {format!("+ {}", axis.flipped().as_str())}
                        </button>
                        {(!is_root).then(|| view! {
                            <button type="button" on:click=move |_| compose(ctx, store, "flip", |c| c.flip_node_axis(&p3))>
                                "Flip"
                            </button>
                            <button
                                type="button"
                                class="delete-btn"
                                on:click=move |_| compose(ctx, store, "remove", |c| c.remove_node(&p4))
                            >
                                "×"
                            </button>
                        })}
                    </div>
                }
            });
            view! {
                <div class="screen-container" style=flex_style(Some(axis), share)>
                    {controls}
                    {children}
                </div>
            }
            .into_any()
        }
        LayoutNode::Cell { path, name, share, tags, items } => {
            let item_views = items.into_iter().map(item_view).collect_view();
            let header = (!name.is_empty()).then(|| view! { <h3 class="cell-name">{name.clone()}</h3> });
            let controls = editing.then(|| {
                let suggestion_tags = tags.clone();
                let suggestions = Signal::derive(move || suggest_tags(&store.data_items().get(), &suggestion_tags));
                let (p1, p2) = (path.clone(), path.clone());
                view! {
                    <div class="node-controls">
                        {name_input(ctx, store, path.clone(), name.clone())}
                        {flex_input(ctx, store, path.clone(), flex)}
                        <div class="tag-list">
                            {tags.iter().map(|tag| {
                                let (label, tag, path) = (tag.clone(), tag.clone(), path.clone());
                                view! {
                                    <span class="tag">
                                        {label}
                                        <button
                                            type="button"
                                            class="tag-delete-btn"
                                            on:click=move |_| compose(ctx, store, "remove tag", |c| c.remove_cell_tag(&path, &tag))
                                        >
                                            "×"
                                        </button>
                                    </span>
                                }
                            }).collect_view()}
                        </div>
                        <TagAutocomplete
                            suggestions=suggestions
                            on_select=move |tag: String| compose(ctx, store, "add tag", |c| c.add_cell_tag(&p1, &tag))
                        />
                        <button
                            type="button"
                            class="delete-btn"
                            on:click=move |_| compose(ctx, store, "remove", |c| c.remove_node(&p2))
                        >
                            "Remove cell"
                        </button>
                    </div>
                }
            });
            let tag_line = (!editing).then(|| view! { <p class="cell-tags">{tags.join(", ")}</p> });
            view! {
                <div class="screen-cell" style=flex_style(None, share)>
                    {header}
                    {controls}
                    {tag_line}
                    <ul class="cell-items">{item_views}</ul>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
pub fn ScreenView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let policy = ctx.shell().config().tag_match;

    view! {
        <div class="screen-view">
            {move || {
                let items = store.data_items().get();
                ctx.composer.with(|c| {
                    let editing = c.is_editing();
                    let screen = c.active()?;
                    c.layout(&items, policy).map(|root| render_node(root, screen, editing, ctx, store))
                })
            }}
        </div>
    }
}
