use crate::menu::MenuView;
use crate::render;
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::{Interval, Timeout};
use mine_hunter_core::{self as game, CellCount, Session, SessionEvent, SessionPhase};
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// End the session after clearing this level
    #[arg(long)]
    max_level: Option<game::Level>,

    /// Seconds on the clock for every level
    #[arg(
        long,
        default_value_t = game::DEFAULT_TIME_LIMIT_SECS,
        value_parser = clap::value_parser!(u32).range(1..),
    )]
    time_limit: u32,
}

impl From<&GameProps> for game::SessionConfig {
    fn from(props: &GameProps) -> Self {
        Self {
            time_limit_secs: props.time_limit,
            max_level: props.max_level,
            ..Default::default()
        }
    }
}

pub trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<SessionEvent, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |event| event.has_update())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    SelectMines(CellCount),
    Start,
    TogglePause,
    Reset,
    Restart,
    ReturnToMenu,
    /// Pointer position relative to the canvas' top-left corner.
    Press(f64, f64),
    Tick,
    FinishTransition(game::TransitionTicket),
}

fn status_line(session: &Session) -> [String; 3] {
    [
        format!("Level: {}", session.level()),
        format!("Time: {}s", session.remaining_secs()),
        format!("Coins: {}", session.coins()),
    ]
}

fn popup_text(session: &Session) -> Option<(&'static str, String)> {
    let headline = match session.phase() {
        SessionPhase::GameOver(cause) => cause.message(),
        SessionPhase::Cleared => "Congratulations!",
        SessionPhase::Menu | SessionPhase::Playing => return None,
    };
    Some((headline, format!("Coins: {}", session.coins())))
}

/// Converts viewport coordinates into coordinates relative to the canvas.
fn canvas_point(canvas: &NodeRef, client_x: i32, client_y: i32) -> Option<Msg> {
    let canvas = canvas.cast::<HtmlCanvasElement>()?;
    let rect = canvas.get_bounding_client_rect();
    Some(Msg::Press(
        f64::from(client_x) - rect.left(),
        f64::from(client_y) - rect.top(),
    ))
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: Session,
    selected_mines: CellCount,
    geometry: game::BoardGeometry,
    canvas: NodeRef,
    timer_interval: Option<Interval>,
    level_timeout: Option<Timeout>,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(1000, move || link.send_message(Msg::Tick))
    }

    fn schedule_transition(&mut self, ctx: &Context<Self>, ticket: game::TransitionTicket) {
        let link = ctx.link().clone();
        let delay = self.session.config().level_message_delay_ms;
        // replacing the handle cancels any older transition
        self.level_timeout = Some(Timeout::new(delay, move || {
            link.send_message(Msg::FinishTransition(ticket))
        }));
    }

    fn stop_timers(&mut self) {
        self.timer_interval = None;
        self.level_timeout = None;
    }

    /// Runs one of the session (re)starting operations and restarts the countdown tick.
    fn begin(
        &mut self,
        ctx: &Context<Self>,
        action: impl FnOnce(&mut Session) -> game::Result<()>,
    ) -> bool {
        self.stop_timers();
        match action(&mut self.session) {
            Ok(()) if self.session.countdown().is_running() => {
                self.timer_interval = Some(Self::create_timer(ctx));
            }
            Ok(()) => log::debug!("game ended before the countdown ran"),
            Err(err) => log::error!("could not start game: {}", err),
        }
        true
    }

    fn press(&mut self, ctx: &Context<Self>, x: f64, y: f64) -> bool {
        let Some(coords) = self.geometry.cell_at(x, y, self.session.board_size()) else {
            log::trace!("press outside the board at ({}, {})", x, y);
            return false;
        };

        let result = self.session.reveal(coords);
        match result {
            Ok(SessionEvent::HitMine | SessionEvent::Cleared) => self.stop_timers(),
            Ok(SessionEvent::LevelComplete(ticket)) => self.schedule_transition(ctx, ticket),
            Ok(SessionEvent::NoChange | SessionEvent::Revealed) => {}
            Err(err) => log::trace!("reveal at {:?} ignored: {}", coords, err),
        }
        result.has_update()
    }

    fn draw(&self) {
        if matches!(self.session.phase(), SessionPhase::Menu) {
            return;
        }
        let Some(canvas) = self.canvas.cast::<HtmlCanvasElement>() else {
            return;
        };
        if let Err(err) = render::draw(&canvas, &self.session, &self.geometry) {
            log::error!("could not draw board: {:?}", err);
        }
    }

    fn view_game(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let [level, time, coins] = status_line(&self.session);
        let extent = self.geometry.extent(self.session.board_size()) as u32;
        let message = self.session.level_message().unwrap_or_default();

        let onclick = {
            let canvas = self.canvas.clone();
            ctx.link().batch_callback(move |e: MouseEvent| {
                canvas_point(&canvas, e.client_x(), e.client_y())
            })
        };
        let ontouchstart = {
            let canvas = self.canvas.clone();
            ctx.link().batch_callback(move |e: TouchEvent| {
                e.prevent_default();
                let touch = e.touches().get(0)?;
                canvas_point(&canvas, touch.client_x(), touch.client_y())
            })
        };
        let cb_pause = ctx.link().callback(|_: MouseEvent| TogglePause);
        let cb_reset = ctx.link().callback(|_: MouseEvent| Reset);
        let cb_menu = ctx.link().callback(|_: MouseEvent| ReturnToMenu);
        let cb_restart = ctx.link().callback(|_: MouseEvent| Restart);

        html! {
            <>
                <div id="game-info">
                    <span id="level">{level}</span>
                    <span id="time">{time}</span>
                    <span id="coins">{coins}</span>
                </div>
                <canvas
                    id="game-canvas"
                    ref={self.canvas.clone()}
                    width={extent.to_string()}
                    height={extent.to_string()}
                    {onclick}
                    {ontouchstart}
                />
                <div id="controls">
                    <button id="pause-btn" onclick={cb_pause}>{self.session.pause_label()}</button>
                    <button id="reset-btn" onclick={cb_reset}>{"Reset"}</button>
                    <button id="menu-btn" onclick={cb_menu}>{"Menu"}</button>
                </div>
                <div id="message">{message}</div>
                if let Some((headline, coins)) = popup_text(&self.session) {
                    <Overlay id="game-over-popup">
                        <p>{headline}</p>
                        <p>{coins}</p>
                        <button id="restart-btn" onclick={cb_restart}>{"Restart"}</button>
                    </Overlay>
                }
            </>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let config = game::SessionConfig::from(ctx.props());
        log::debug!("session config: {:?}", config);
        Self {
            session: Session::new(config, js_random_seed()),
            selected_mines: game::DEFAULT_MINES,
            geometry: game::BoardGeometry::DEFAULT,
            canvas: NodeRef::default(),
            timer_interval: None,
            level_timeout: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            SelectMines(mines) => {
                log::debug!("selected {} mines", mines);
                let changed = self.selected_mines != mines;
                self.selected_mines = mines;
                changed
            }
            Start => {
                let mines = self.selected_mines;
                self.begin(ctx, |session| session.start(mines))
            }
            Reset => self.begin(ctx, Session::reset),
            Restart => self.begin(ctx, Session::restart),
            ReturnToMenu => {
                self.stop_timers();
                self.session.return_to_menu();
                true
            }
            TogglePause => match self.session.toggle_pause() {
                Ok(_) => true,
                Err(err) => {
                    log::debug!("pause ignored: {}", err);
                    false
                }
            },
            Press(x, y) => self.press(ctx, x, y),
            Tick => {
                let outcome = self.session.tick();
                if let game::TickOutcome::Expired = outcome {
                    self.stop_timers();
                }
                outcome.has_update()
            }
            FinishTransition(ticket) => {
                self.level_timeout = None;
                self.session.finish_level_transition(ticket)
            }
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        self.draw();
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let content = if matches!(self.session.phase(), SessionPhase::Menu) {
            let onselect = ctx.link().callback(Msg::SelectMines);
            let onstart = ctx.link().callback(|()| Msg::Start);
            html! {
                <MenuView mines={self.selected_mines} {onselect} {onstart}/>
            }
        } else {
            self.view_game(ctx)
        };

        html! {
            <div class="mine-hunter">{content}</div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> Session {
        let mut session = Session::new(game::SessionConfig::default(), 3);
        session.start(game::DEFAULT_MINES).unwrap();
        session
    }

    #[test]
    fn status_line_shows_level_time_and_coins() {
        let session = playing();

        assert_eq!(
            status_line(&session),
            ["Level: 1".to_string(), "Time: 180s".to_string(), "Coins: 0".to_string()]
        );
    }

    #[test]
    fn popup_only_shows_once_the_game_is_over() {
        let mut session = playing();
        assert_eq!(popup_text(&session), None);

        let size = session.board_size();
        let mine = (0..size)
            .flat_map(|row| (0..size).map(move |col| (row, col)))
            .find(|&coords| session.engine().unwrap().has_mine_at(coords))
            .unwrap();
        session.reveal(mine).unwrap();

        assert_eq!(
            popup_text(&session),
            Some(("You clicked a mine! Game Over!", "Coins: 0".to_string()))
        );
    }

    #[test]
    fn props_map_onto_session_config() {
        let props = GameProps {
            max_level: Some(7),
            time_limit: 90,
        };
        let config = game::SessionConfig::from(&props);

        assert_eq!(config.max_level, Some(7));
        assert_eq!(config.time_limit_secs, 90);
        assert_eq!(config.level_message_delay_ms, 2000);
    }

    #[test]
    fn has_update_treats_errors_as_no_op() {
        let rejected: game::Result<SessionEvent> = Err(game::GameError::Paused);

        assert!(!rejected.has_update());
        assert!(!Ok::<_, game::GameError>(SessionEvent::NoChange).has_update());
        assert!(Ok::<_, game::GameError>(SessionEvent::Revealed).has_update());
    }
}
