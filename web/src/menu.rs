use mine_hunter_core::{self as game, CellCount};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct MenuProps {
    pub mines: CellCount,
    pub onselect: Callback<CellCount>,
    pub onstart: Callback<()>,
}

#[function_component]
pub(crate) fn MenuView(props: &MenuProps) -> Html {
    let onchange = {
        let onselect = props.onselect.clone();
        Callback::from(move |e: Event| {
            let Some(select) = e.target_dyn_into::<HtmlSelectElement>() else {
                return;
            };
            match select.value().parse::<CellCount>() {
                Ok(mines) => onselect.emit(mines),
                Err(err) => log::error!("bad mine count {:?}: {}", select.value(), err),
            }
        })
    };
    let onclick = props.onstart.reform(|_: MouseEvent| ());

    html! {
        <div id="menu">
            <h1>{"Mine Hunter"}</h1>
            <span>{"Number of mines: "}</span>
            <select id="mines-select" {onchange}>
                {
                    for game::MINE_CHOICES.map(|mines| html! {
                        <option value={mines.to_string()} selected={mines == props.mines}>
                            {mines.to_string()}
                        </option>
                    })
                }
            </select>
            <button id="start-btn" {onclick}>{"Start Game"}</button>
        </div>
    }
}
