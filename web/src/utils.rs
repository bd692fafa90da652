use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct OverlayProps {
    pub id: AttrValue,
    #[prop_or_default]
    pub children: Html,
}

/// Full-screen overlay portalled into `document.body`, above the board and controls.
#[function_component]
pub(crate) fn Overlay(props: &OverlayProps) -> Html {
    let host = gloo::utils::body();
    let content = html! {
        <div id={props.id.clone()}>{props.children.clone()}</div>
    };
    create_portal(content, host.into())
}

/// Board seed from `Math.random`, one byte per call.
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes(core::array::from_fn(|_| (256. * random()) as u8))
}
