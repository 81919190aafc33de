//! A testable implementation of the [XConn] trait.
//!
//! Implement [MockXConn] for a test double and only override the `mock_`
//! methods your test cares about: everything else defaults to a benign
//! value. The blanket `impl XConn for T: MockXConn` then lets the double be
//! used anywhere a real connection is expected.
use crate::{
    core::bindings::{KeyCode, MouseState},
    pure::geometry::{Point, Rect},
    x::{event::XEvent, WinType, XConn},
    Color, Error, Result, Xid,
};

/// A stubbed out [XConn] for testing management logic without a server.
#[allow(missing_docs)]
pub trait MockXConn {
    fn mock_root(&self) -> Xid {
        Xid(0)
    }

    fn mock_screen_size(&self) -> Result<Rect> {
        Ok(Rect::new(0, 0, 1920, 1080))
    }

    fn mock_cursor_position(&self) -> Result<Point> {
        Ok(Point::default())
    }

    fn mock_client_under_pointer(&self) -> Result<Option<Xid>> {
        Ok(None)
    }

    fn mock_focused_client(&self) -> Result<Option<Xid>> {
        Ok(None)
    }

    fn mock_grab(&self, _: &[KeyCode], _: &[MouseState]) -> Result<()> {
        Ok(())
    }

    fn mock_next_event(&self) -> Result<XEvent> {
        Err(Error::ConnectionClosed)
    }

    fn mock_flush(&self) {}

    fn mock_client_geometry(&self, _: Xid) -> Result<Rect> {
        Ok(Rect::default())
    }

    fn mock_window_type(&self, _: Xid) -> Result<WinType> {
        Ok(WinType::Normal)
    }

    fn mock_position_client(&self, _: Xid, _: Rect) -> Result<()> {
        Ok(())
    }

    fn mock_move_client(&self, _: Xid, _: Point) -> Result<()> {
        Ok(())
    }

    fn mock_resize_client(&self, _: Xid, _: u32, _: u32) -> Result<()> {
        Ok(())
    }

    fn mock_map(&self, _: Xid) -> Result<()> {
        Ok(())
    }

    fn mock_unmap(&self, _: Xid) -> Result<()> {
        Ok(())
    }

    fn mock_raise(&self, _: Xid) -> Result<()> {
        Ok(())
    }

    fn mock_kill(&self, _: Xid) -> Result<()> {
        Ok(())
    }

    fn mock_focus(&self, _: Xid) -> Result<()> {
        Ok(())
    }

    fn mock_set_border_width(&self, _: Xid, _: u32) -> Result<()> {
        Ok(())
    }

    fn mock_set_border_color(&self, _: Xid, _: Color) -> Result<()> {
        Ok(())
    }
}

impl<T: MockXConn> XConn for T {
    fn root(&self) -> Xid {
        self.mock_root()
    }

    fn screen_size(&self) -> Result<Rect> {
        self.mock_screen_size()
    }

    fn cursor_position(&self) -> Result<Point> {
        self.mock_cursor_position()
    }

    fn client_under_pointer(&self) -> Result<Option<Xid>> {
        self.mock_client_under_pointer()
    }

    fn focused_client(&self) -> Result<Option<Xid>> {
        self.mock_focused_client()
    }

    fn grab(&self, key_codes: &[KeyCode], mouse_states: &[MouseState]) -> Result<()> {
        self.mock_grab(key_codes, mouse_states)
    }

    fn next_event(&self) -> Result<XEvent> {
        self.mock_next_event()
    }

    fn flush(&self) {
        self.mock_flush()
    }

    fn client_geometry(&self, client: Xid) -> Result<Rect> {
        self.mock_client_geometry(client)
    }

    fn window_type(&self, client: Xid) -> Result<WinType> {
        self.mock_window_type(client)
    }

    fn position_client(&self, client: Xid, r: Rect) -> Result<()> {
        self.mock_position_client(client, r)
    }

    fn move_client(&self, client: Xid, p: Point) -> Result<()> {
        self.mock_move_client(client, p)
    }

    fn resize_client(&self, client: Xid, w: u32, h: u32) -> Result<()> {
        self.mock_resize_client(client, w, h)
    }

    fn map(&self, client: Xid) -> Result<()> {
        self.mock_map(client)
    }

    fn unmap(&self, client: Xid) -> Result<()> {
        self.mock_unmap(client)
    }

    fn raise(&self, client: Xid) -> Result<()> {
        self.mock_raise(client)
    }

    fn kill(&self, client: Xid) -> Result<()> {
        self.mock_kill(client)
    }

    fn focus(&self, client: Xid) -> Result<()> {
        self.mock_focus(client)
    }

    fn set_border_width(&self, client: Xid, px: u32) -> Result<()> {
        self.mock_set_border_width(client, px)
    }

    fn set_border_color(&self, client: Xid, color: Color) -> Result<()> {
        self.mock_set_border_color(client, color)
    }
}
