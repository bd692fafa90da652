use anyhow::{Result, anyhow};
use mine_hunter_core::{self as game, BoardGeometry, CellState, Session};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const HIDDEN_FILL: &str = "#cccccc";
const EMPTY_FILL: &str = "#00ff00";
const MINE_FILL: &str = "#ff0000";
const TEXT_FILL: &str = "#000";
const PAUSE_FILL: &str = "#ffffff";
const CELL_FONT: &str = "20px Arial";
const PAUSE_FONT: &str = "24px Arial";

pub(crate) const fn cell_fill(cell: CellState) -> &'static str {
    match cell {
        CellState::Hidden => HIDDEN_FILL,
        CellState::Empty => EMPTY_FILL,
        CellState::Mine => MINE_FILL,
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|err| anyhow!("get_context failed: {:?}", err))?
        .ok_or_else(|| anyhow!("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| anyhow!("context is not a CanvasRenderingContext2d"))
}

/// Repaints the whole board, or the pause screen while the session is paused.
pub(crate) fn draw(
    canvas: &HtmlCanvasElement,
    session: &Session,
    geometry: &BoardGeometry,
) -> Result<()> {
    let ctx = context_2d(canvas)?;
    let width = f64::from(canvas.width());
    let height = f64::from(canvas.height());
    ctx.clear_rect(0., 0., width, height);

    if session.is_paused() {
        return draw_paused(&ctx, width, height);
    }

    ctx.set_font(CELL_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    let size = session.board_size();
    let half = geometry.box_size / 2.;
    for row in 0..size {
        for col in 0..size {
            let coords: game::Coord2 = (row, col);
            let cell = session.cell_at(coords);
            let (x, y) = geometry.cell_origin(coords);

            ctx.set_fill_style_str(cell_fill(cell));
            ctx.fill_rect(x, y, geometry.box_size, geometry.box_size);
            ctx.stroke_rect(x, y, geometry.box_size, geometry.box_size);

            ctx.set_fill_style_str(TEXT_FILL);
            ctx.fill_text(cell.glyph(), x + half, y + half)
                .map_err(|err| anyhow!("fill_text failed: {:?}", err))?;
        }
    }
    Ok(())
}

fn draw_paused(ctx: &CanvasRenderingContext2d, width: f64, height: f64) -> Result<()> {
    ctx.set_fill_style_str(PAUSE_FILL);
    ctx.fill_rect(0., 0., width, height);
    ctx.set_fill_style_str(TEXT_FILL);
    ctx.set_font(PAUSE_FONT);
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text("PAUSED", width / 2., height / 2.)
        .map_err(|err| anyhow!("fill_text failed: {:?}", err))
}
