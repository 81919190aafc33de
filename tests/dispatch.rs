//! Driving the event dispatcher end to end through a recording connection.
use macchiato::{
    builtin::actions,
    core::{
        bindings::{KeyBindings, KeyCode, MouseButton, MouseEvent, MouseEventKind, MouseState},
        hooks::{Hook, Hooks},
        Config, State, WindowManager,
    },
    pure::geometry::{Point, Rect},
    x::{
        event::{ConfigureEvent, PointerChange},
        mock::MockXConn,
        WinType, XEvent,
    },
    Color, Result, Xid,
};
use std::{cell::RefCell, collections::HashMap, rc::Rc};

fn xid(n: u32) -> Xid {
    Xid::from(n)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    PositionClient(Xid, Rect),
    MoveClient(Xid, Point),
    ResizeClient(Xid, u32, u32),
    Map(Xid),
    Unmap(Xid),
    Raise(Xid),
    Kill(Xid),
    Focus(Xid),
    SetBorderWidth(Xid, u32),
    SetBorderColor(Xid, u32),
}

#[derive(Default)]
struct RecordingConn {
    calls: Rc<RefCell<Vec<Call>>>,
    under_pointer: Option<Xid>,
    window_types: HashMap<Xid, WinType>,
}

impl RecordingConn {
    fn push(&self, c: Call) {
        self.calls.borrow_mut().push(c);
    }
}

impl MockXConn for RecordingConn {
    fn mock_client_under_pointer(&self) -> Result<Option<Xid>> {
        Ok(self.under_pointer)
    }

    fn mock_client_geometry(&self, _: Xid) -> Result<Rect> {
        Ok(Rect::new(100, 100, 800, 600))
    }

    fn mock_window_type(&self, client: Xid) -> Result<WinType> {
        Ok(self.window_types.get(&client).copied().unwrap_or_default())
    }

    fn mock_position_client(&self, client: Xid, r: Rect) -> Result<()> {
        self.push(Call::PositionClient(client, r));
        Ok(())
    }

    fn mock_move_client(&self, client: Xid, p: Point) -> Result<()> {
        self.push(Call::MoveClient(client, p));
        Ok(())
    }

    fn mock_resize_client(&self, client: Xid, w: u32, h: u32) -> Result<()> {
        self.push(Call::ResizeClient(client, w, h));
        Ok(())
    }

    fn mock_map(&self, client: Xid) -> Result<()> {
        self.push(Call::Map(client));
        Ok(())
    }

    fn mock_unmap(&self, client: Xid) -> Result<()> {
        self.push(Call::Unmap(client));
        Ok(())
    }

    fn mock_raise(&self, client: Xid) -> Result<()> {
        self.push(Call::Raise(client));
        Ok(())
    }

    fn mock_kill(&self, client: Xid) -> Result<()> {
        self.push(Call::Kill(client));
        Ok(())
    }

    fn mock_focus(&self, client: Xid) -> Result<()> {
        self.push(Call::Focus(client));
        Ok(())
    }

    fn mock_set_border_width(&self, client: Xid, px: u32) -> Result<()> {
        self.push(Call::SetBorderWidth(client, px));
        Ok(())
    }

    fn mock_set_border_color(&self, client: Xid, color: Color) -> Result<()> {
        self.push(Call::SetBorderColor(client, color.rgb_u32()));
        Ok(())
    }
}

type WmAndCalls = (WindowManager<RecordingConn>, Rc<RefCell<Vec<Call>>>);

// set RUST_LOG=trace to see handler logging while debugging a test
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

fn wm_with(
    config: Config<RecordingConn>,
    bindings: KeyBindings<RecordingConn>,
    under_pointer: Option<Xid>,
    dialogs: &[Xid],
) -> WmAndCalls {
    init_logging();
    let conn = RecordingConn {
        under_pointer,
        window_types: dialogs.iter().map(|&id| (id, WinType::Dialog)).collect(),
        ..RecordingConn::default()
    };
    let calls = Rc::clone(&conn.calls);

    (WindowManager::new(config, bindings, conn), calls)
}

fn calls_of(calls: &Rc<RefCell<Vec<Call>>>) -> Vec<Call> {
    calls.borrow().clone()
}

fn press(id: Xid, button: MouseButton, p: Point) -> XEvent {
    XEvent::MouseEvent(MouseEvent::new(
        id,
        p,
        MouseState::new(button, vec![]),
        MouseEventKind::Press,
    ))
}

fn motion(id: Xid, p: Point) -> XEvent {
    XEvent::MouseEvent(MouseEvent::new(
        id,
        p,
        MouseState::new(MouseButton::Left, vec![]),
        MouseEventKind::Motion,
    ))
}

const TOGGLE_FS: KeyCode = KeyCode { mask: 0, code: 41 };
const MINIMIZE: KeyCode = KeyCode { mask: 0, code: 42 };

fn test_bindings() -> KeyBindings<RecordingConn> {
    let mut bindings: KeyBindings<RecordingConn> = HashMap::new();
    bindings.insert(TOGGLE_FS, actions::toggle_fullscreen());
    bindings.insert(MINIMIZE, actions::minimize());

    bindings
}

#[test]
fn maximize_round_trips_to_the_saved_geometry() {
    let config = Config {
        tiling_enabled: false,
        border_width: 5,
        ..Config::default()
    };
    let (mut wm, calls) = wm_with(config, test_bindings(), Some(xid(1)), &[]);

    wm.handle_xevent(XEvent::MapRequest(xid(1))).unwrap();
    calls.borrow_mut().clear();

    // The default screen is 1920x1080: fullscreen fills it less the border.
    wm.handle_xevent(XEvent::KeyPress(TOGGLE_FS)).unwrap();
    assert!(calls_of(&calls).contains(&Call::PositionClient(xid(1), Rect::new(0, 0, 1910, 1070))));

    calls.borrow_mut().clear();
    wm.handle_xevent(XEvent::KeyPress(TOGGLE_FS)).unwrap();
    assert!(calls_of(&calls).contains(&Call::PositionClient(xid(1), Rect::new(100, 100, 800, 600))));
}

#[test]
fn minimize_only_unmaps_once() {
    let config = Config {
        tiling_enabled: false,
        ..Config::default()
    };
    let (mut wm, calls) = wm_with(config, test_bindings(), Some(xid(1)), &[]);

    wm.handle_xevent(XEvent::MapRequest(xid(1))).unwrap();
    wm.handle_xevent(XEvent::KeyPress(MINIMIZE)).unwrap();
    wm.handle_xevent(XEvent::KeyPress(MINIMIZE)).unwrap();

    let unmaps = calls_of(&calls)
        .iter()
        .filter(|c| matches!(c, Call::Unmap(_)))
        .count();
    assert_eq!(unmaps, 1);
    assert!(wm.state.clients.state(&xid(1)).unwrap().is_minimized());
}

#[test]
fn maximizing_a_minimized_client_restores_it_first() {
    let config = Config {
        tiling_enabled: false,
        ..Config::default()
    };
    let (mut wm, calls) = wm_with(config, test_bindings(), Some(xid(1)), &[]);

    wm.handle_xevent(XEvent::MapRequest(xid(1))).unwrap();
    wm.handle_xevent(XEvent::KeyPress(MINIMIZE)).unwrap();
    calls.borrow_mut().clear();

    wm.handle_xevent(XEvent::KeyPress(TOGGLE_FS)).unwrap();

    let state = wm.state.clients.state(&xid(1)).unwrap();
    assert!(!state.is_minimized());
    assert!(state.is_fullscreen());
    assert!(calls_of(&calls).contains(&Call::Map(xid(1))));
}

#[test]
fn motion_after_the_target_is_destroyed_issues_no_commands() {
    let config = Config {
        tiling_enabled: false, // plain left click drags when floating
        ..Config::default()
    };
    let (mut wm, calls) = wm_with(config, test_bindings(), Some(xid(1)), &[]);

    wm.handle_xevent(XEvent::MapRequest(xid(1))).unwrap();
    wm.handle_xevent(press(xid(1), MouseButton::Left, Point::new(500, 500)))
        .unwrap();
    wm.handle_xevent(XEvent::Destroy(xid(1))).unwrap();
    calls.borrow_mut().clear();

    wm.handle_xevent(motion(xid(1), Point::new(600, 600))).unwrap();

    assert!(calls_of(&calls).is_empty());
}

#[test]
fn drag_motion_moves_the_window() {
    let config = Config {
        tiling_enabled: false,
        ..Config::default()
    };
    let (mut wm, calls) = wm_with(config, test_bindings(), Some(xid(1)), &[]);

    wm.handle_xevent(XEvent::MapRequest(xid(1))).unwrap();
    wm.handle_xevent(press(xid(1), MouseButton::Left, Point::new(500, 500)))
        .unwrap();
    calls.borrow_mut().clear();

    // anchor rect is (100, 100, 800, 600) and the pointer moved +100+50
    wm.handle_xevent(motion(xid(1), Point::new(600, 550))).unwrap();

    assert_eq!(
        calls_of(&calls),
        vec![Call::MoveClient(xid(1), Point::new(200, 150))]
    );
}

#[test]
fn dialog_windows_are_replaced_with_the_file_manager() {
    let config = Config {
        file_manager: "true".to_string(),
        ..Config::default()
    };
    let (mut wm, calls) = wm_with(config, test_bindings(), None, &[xid(2)]);

    wm.handle_xevent(XEvent::MapRequest(xid(2))).unwrap();

    let calls = calls_of(&calls);
    assert!(calls.contains(&Call::Kill(xid(2))));
    assert!(!calls.contains(&Call::Map(xid(2))));
    assert!(!wm.state.clients.contains(&xid(2)));
}

#[test]
fn configure_requests_force_the_border_width() {
    let (mut wm, calls) = wm_with(Config::default(), test_bindings(), None, &[]);

    let r = Rect::new(1, 2, 300, 400);
    wm.handle_xevent(XEvent::ConfigureRequest(ConfigureEvent { id: xid(7), r }))
        .unwrap();

    assert_eq!(
        calls_of(&calls),
        vec![
            Call::PositionClient(xid(7), r),
            Call::SetBorderWidth(xid(7), 5),
        ]
    );
}

#[test]
fn mapping_three_clients_tiles_them_below_the_bar() {
    // 1920x1080 screen with a 40px bar, 10px gaps and 5px borders
    let (mut wm, calls) = wm_with(Config::default(), test_bindings(), None, &[]);

    wm.handle_xevent(XEvent::MapRequest(xid(1))).unwrap();
    wm.handle_xevent(XEvent::MapRequest(xid(2))).unwrap();
    calls.borrow_mut().clear();
    wm.handle_xevent(XEvent::MapRequest(xid(3))).unwrap();

    let positions: Vec<Call> = calls_of(&calls)
        .into_iter()
        .filter(|c| matches!(c, Call::PositionClient(..)))
        .collect();

    assert_eq!(
        positions,
        vec![
            Call::PositionClient(xid(1), Rect::new(58, 76, 887, 958)),
            Call::PositionClient(xid(2), Rect::new(965, 76, 887, 469)),
            Call::PositionClient(xid(3), Rect::new(965, 565, 887, 469)),
        ]
    );
}

#[test]
fn entering_a_client_focuses_it_and_sweeps_borders() {
    let config: Config<RecordingConn> = Config::default();
    let focused = config.focused_border.rgb_u32();
    let normal = config.normal_border.rgb_u32();
    let (mut wm, calls) = wm_with(config, test_bindings(), None, &[]);

    wm.handle_xevent(XEvent::MapRequest(xid(1))).unwrap();
    wm.handle_xevent(XEvent::MapRequest(xid(2))).unwrap();
    calls.borrow_mut().clear();

    wm.handle_xevent(XEvent::Enter(PointerChange {
        id: xid(2),
        abs: Point::new(0, 0),
    }))
    .unwrap();

    let calls = calls_of(&calls);
    assert!(calls.contains(&Call::Focus(xid(2))));
    assert!(calls.contains(&Call::SetBorderColor(xid(2), focused)));
    assert!(calls.contains(&Call::SetBorderColor(xid(1), normal)));
}

struct BarHook {
    clicks: Rc<RefCell<Vec<Point>>>,
}

impl Hook<RecordingConn> for BarHook {
    fn bar_clicked(
        &mut self,
        p: Point,
        _: &mut State<RecordingConn>,
        _: &RecordingConn,
    ) -> Result<()> {
        self.clicks.borrow_mut().push(p);
        Ok(())
    }
}

#[test]
fn bar_presses_are_routed_to_the_bar_hook() {
    let clicks: Rc<RefCell<Vec<Point>>> = Default::default();
    let hooks: Hooks<RecordingConn> = vec![Box::new(BarHook {
        clicks: Rc::clone(&clicks),
    })];
    let config = Config {
        hooks,
        ..Config::default()
    };
    let (mut wm, calls) = wm_with(config, test_bindings(), None, &[]);
    wm.state.bar = Some(xid(10));

    wm.handle_xevent(press(xid(10), MouseButton::Left, Point::new(12, 8)))
        .unwrap();

    assert_eq!(clicks.borrow().as_slice(), &[Point::new(12, 8)]);
    assert_eq!(wm.state.drag.target(), None);
    assert!(calls_of(&calls).is_empty());
}

#[test]
fn presses_on_unmanaged_windows_deselect() {
    let (mut wm, _) = wm_with(Config::default(), test_bindings(), Some(xid(1)), &[]);

    wm.handle_xevent(XEvent::MapRequest(xid(1))).unwrap();
    wm.handle_xevent(press(xid(1), MouseButton::Left, Point::new(0, 0)))
        .unwrap();
    assert_eq!(wm.state.drag.target(), Some(xid(1)));

    wm.handle_xevent(press(xid(99), MouseButton::Left, Point::new(0, 0)))
        .unwrap();
    assert_eq!(wm.state.drag.target(), None);
}

#[test]
fn destroying_a_client_retiles_the_rest() {
    let (mut wm, calls) = wm_with(Config::default(), test_bindings(), None, &[]);

    wm.handle_xevent(XEvent::MapRequest(xid(1))).unwrap();
    wm.handle_xevent(XEvent::MapRequest(xid(2))).unwrap();
    calls.borrow_mut().clear();

    wm.handle_xevent(XEvent::Destroy(xid(1))).unwrap();

    // the remaining client takes the whole usable area below the bar
    assert_eq!(
        calls_of(&calls),
        vec![Call::PositionClient(xid(2), Rect::new(58, 76, 1794, 958))]
    );
    assert!(!wm.state.clients.contains(&xid(1)));
}
