use chart_index::{MapEntry, ProductEntry};
use yew::prelude::*;

fn link_click(on_select: &Callback<usize>, index: usize) -> Callback<MouseEvent> {
    let on_select = on_select.clone();
    Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        on_select.emit(index);
    })
}

// ─── Product list ────────────────────────────────────────────────────

#[derive(Properties, PartialEq)]
pub struct ProductListProps {
    pub products: Vec<ProductEntry>,
    pub selected: Option<usize>,
    pub on_select: Callback<usize>,
}

#[function_component(ProductList)]
pub fn product_list(props: &ProductListProps) -> Html {
    html! {
        <div class="product_index">
            <ul>
                {for props.products.iter().enumerate().map(|(idx, product)| {
                    let is_selected = props.selected == Some(idx);
                    html! {
                        <li>
                            <a class={classes!("link", is_selected.then_some("selected"))}
                                href=""
                                onclick={link_click(&props.on_select, idx)}
                            >{&product.name}</a>
                        </li>
                    }
                })}
            </ul>
        </div>
    }
}

// ─── Map list ────────────────────────────────────────────────────────

#[derive(Properties, PartialEq)]
pub struct MapListProps {
    pub title: Option<String>,
    pub entries: Vec<MapEntry>,
    pub on_select: Callback<usize>,
}

#[function_component(MapList)]
pub fn map_list(props: &MapListProps) -> Html {
    html! {
        <div class="index">
            if let Some(title) = &props.title {
                <div class="list-title">{title}</div>
            }
            <ul>
                {for props.entries.iter().enumerate().map(|(idx, map)| html! {
                    <li>
                        <a class="link" href="" onclick={link_click(&props.on_select, idx)}>
                            {map.label()}
                        </a>
                    </li>
                })}
            </ul>
        </div>
    }
}

// ─── Image surface ───────────────────────────────────────────────────

#[derive(Properties, PartialEq)]
pub struct ImageSurfaceProps {
    pub src: Option<String>,
}

/// The one chart image on the page. Only `src` changes between renders.
#[function_component(ImageSurface)]
pub fn image_surface(props: &ImageSurfaceProps) -> Html {
    html! {
        <div class="mapframe">
            <img id="mapframe" src={props.src.clone()} />
        </div>
    }
}

// ─── Error banner ────────────────────────────────────────────────────

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: String,
    pub on_dismiss: Callback<()>,
}

#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    let onclick = {
        let cb = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    html! {
        <div class="error-banner" role="alert">
            <span>{&props.message}</span>
            <button class="error-dismiss" {onclick}>{"×"}</button>
        </div>
    }
}
