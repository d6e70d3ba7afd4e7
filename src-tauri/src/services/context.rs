//! The single owned state object driven by the host event loop.

use crate::services::config::{HoverCheck, ScrollConfig};
use crate::services::hover::{HoverDetector, IconGeometry, PointerService};
use crate::services::subscription::{
    RawInputRegistrar, SubscriptionState, SubscriptionToggle, Transition,
};
use crate::services::wheel::{decode_wheel, RawMouseEvent, WheelAxis, WheelTick};

/// Coarse class of a window message, used by the hover-check policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    RawInput,
    Mouse,
    Other,
}

const WM_INPUT: u32 = 0x00FF;
const WM_NCMOUSEFIRST: u32 = 0x00A0;
const WM_NCMOUSELAST: u32 = 0x00AD;
const WM_MOUSEFIRST: u32 = 0x0200;
const WM_MOUSELAST: u32 = 0x020E;
const WM_MOUSEHOVER: u32 = 0x02A1;
const WM_MOUSELEAVE: u32 = 0x02A3;

impl MessageKind {
    pub fn from_message(msg: u32) -> Self {
        match msg {
            WM_INPUT => Self::RawInput,
            WM_NCMOUSEFIRST..=WM_NCMOUSELAST
            | WM_MOUSEFIRST..=WM_MOUSELAST
            | WM_MOUSEHOVER
            | WM_MOUSELEAVE => Self::Mouse,
            _ => Self::Other,
        }
    }
}

/// Notification area callbacks for the icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayNotification {
    Enter,
    Move,
    Leave,
    Click,
    DoubleClick,
}

/// Entry points called by the host event loop, one per event category.
///
/// The loop must call `on_message` for a message before any category handler for
/// that same message.
pub trait TrayEventHandler {
    /// Every message dispatched to the sink window. Returns the fresh hover state, or
    /// `None` when the configured policy skipped the check.
    fn on_message(&mut self, kind: MessageKind) -> Option<bool>;
    /// A raw input payload, `None` when it could not be read.
    fn on_raw_input(&mut self, event: Option<RawMouseEvent>) -> Option<WheelTick>;
    fn on_tray_event(&mut self, notification: TrayNotification);
    fn on_teardown(&mut self);
}

pub struct TrayScrollContext<P, G, R> {
    hover: HoverDetector<P, G>,
    toggle: SubscriptionToggle<R>,
    hover_check: HoverCheck,
    horizontal_wheel: bool,
}

impl<P, G, R> TrayScrollContext<P, G, R>
where
    P: PointerService,
    G: IconGeometry,
    R: RawInputRegistrar,
{
    pub fn new(pointer: P, geometry: G, registrar: R, config: &ScrollConfig) -> Self {
        Self {
            hover: HoverDetector::new(pointer, geometry),
            toggle: SubscriptionToggle::new(registrar),
            hover_check: config.hover_check,
            horizontal_wheel: config.horizontal_wheel,
        }
    }

    pub fn subscription(&self) -> SubscriptionState {
        self.toggle.state()
    }

    pub fn hover(&self) -> &HoverDetector<P, G> {
        &self.hover
    }

    pub fn registrar(&self) -> &R {
        self.toggle.registrar()
    }

    /// Hover check followed by the subscription transition.
    pub fn refresh_hover(&mut self) -> bool {
        let hovering = self.hover.is_pointer_over_tray_icon();
        self.toggle.update_subscription(hovering);
        hovering
    }
}

impl<P, G, R> TrayEventHandler for TrayScrollContext<P, G, R>
where
    P: PointerService,
    G: IconGeometry,
    R: RawInputRegistrar,
{
    fn on_message(&mut self, kind: MessageKind) -> Option<bool> {
        match (self.hover_check, kind) {
            (HoverCheck::PointerEvents, MessageKind::Other) => None,
            _ => Some(self.refresh_hover()),
        }
    }

    fn on_raw_input(&mut self, event: Option<RawMouseEvent>) -> Option<WheelTick> {
        // Input already queued when the listener was removed is dropped.
        if !self.toggle.state().is_subscribed() {
            return None;
        }
        let tick = decode_wheel(&event?, self.horizontal_wheel)?;
        match tick.axis {
            WheelAxis::Vertical => log::info!("Raw wheel: delta={}", tick.delta),
            WheelAxis::Horizontal => log::info!("Raw hwheel: delta={}", tick.delta),
        }
        Some(tick)
    }

    fn on_tray_event(&mut self, notification: TrayNotification) {
        let hovering = self.refresh_hover();
        log::trace!(
            "Tray notification {:?} (hovering={}, subscription={:?})",
            notification,
            hovering,
            self.toggle.state()
        );
    }

    fn on_teardown(&mut self) {
        if let Transition::Unsubscribed = self.toggle.shutdown() {
            log::info!("Raw mouse input released on teardown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::hover::tests::{FakeIcon, FakePointer};
    use crate::services::hover::ScreenRect;
    use crate::services::subscription::tests::{Call, FakeRegistrar};
    use crate::services::wheel::{RI_MOUSE_HWHEEL, RI_MOUSE_WHEEL};

    const ICON: ScreenRect = ScreenRect::new(1800, 1040, 1824, 1064);
    const RI_MOUSE_MOVE_ONLY: u16 = 0;

    type TestContext = TrayScrollContext<FakePointer, FakeIcon, FakeRegistrar>;

    fn context(config: &ScrollConfig) -> TestContext {
        TrayScrollContext::new(
            FakePointer::at(0, 0),
            FakeIcon::at(ICON),
            FakeRegistrar::default(),
            config,
        )
    }

    fn wheel(delta: i16) -> Option<RawMouseEvent> {
        Some(RawMouseEvent::mouse(RI_MOUSE_WHEEL, delta as u16))
    }

    #[test]
    fn test_message_kind_from_message() {
        assert_eq!(MessageKind::from_message(0x00FF), MessageKind::RawInput);
        assert_eq!(MessageKind::from_message(0x0200), MessageKind::Mouse); // WM_MOUSEMOVE
        assert_eq!(MessageKind::from_message(0x020A), MessageKind::Mouse); // WM_MOUSEWHEEL
        assert_eq!(MessageKind::from_message(0x00A0), MessageKind::Mouse); // WM_NCMOUSEMOVE
        assert_eq!(MessageKind::from_message(0x02A3), MessageKind::Mouse);
        assert_eq!(MessageKind::from_message(0x0113), MessageKind::Other); // WM_TIMER
        assert_eq!(MessageKind::from_message(0x0010), MessageKind::Other); // WM_CLOSE
    }

    #[test]
    fn test_hover_wheel_leave_scenario() {
        let mut ctx = context(&ScrollConfig::default());

        // Pointer somewhere on the desktop.
        assert_eq!(ctx.on_message(MessageKind::Other), Some(false));
        assert_eq!(ctx.subscription(), SubscriptionState::Unsubscribed);

        // Enters icon bounds.
        ctx.hover().pointer().move_to(1812, 1052);
        ctx.on_tray_event(TrayNotification::Enter);
        assert_eq!(ctx.subscription(), SubscriptionState::Subscribed);

        // Wheel down while hovering.
        assert_eq!(ctx.on_message(MessageKind::RawInput), Some(true));
        let tick = ctx.on_raw_input(wheel(-120));
        assert_eq!(tick.map(|t| t.delta), Some(-120));
        assert_eq!(tick.map(|t| t.axis), Some(WheelAxis::Vertical));

        // Mouse move out of bounds arrives as raw input; the hover check runs first.
        ctx.hover().pointer().move_to(1500, 900);
        assert_eq!(ctx.on_message(MessageKind::RawInput), Some(false));
        assert_eq!(ctx.subscription(), SubscriptionState::Unsubscribed);
        assert_eq!(
            ctx.on_raw_input(Some(RawMouseEvent::mouse(RI_MOUSE_MOVE_ONLY, 0))),
            None
        );

        // A stale wheel event queued before removal is not reported.
        assert_eq!(ctx.on_raw_input(wheel(-120)), None);

        assert_eq!(
            ctx.registrar().calls,
            vec![Call::Subscribe, Call::Unsubscribe]
        );
    }

    #[test]
    fn test_every_message_triggers_hover_check_by_default() {
        let mut ctx = context(&ScrollConfig::default());
        ctx.on_message(MessageKind::Other);
        ctx.on_message(MessageKind::Mouse);
        ctx.on_message(MessageKind::RawInput);
        assert_eq!(ctx.hover().pointer().queries.get(), 3);
    }

    #[test]
    fn test_pointer_policy_skips_unrelated_messages() {
        let config = ScrollConfig {
            hover_check: HoverCheck::PointerEvents,
            ..ScrollConfig::default()
        };
        let mut ctx = context(&config);
        ctx.hover().pointer().move_to(1812, 1052);

        assert_eq!(ctx.on_message(MessageKind::Other), None);
        assert_eq!(ctx.subscription(), SubscriptionState::Unsubscribed);
        assert_eq!(ctx.hover().pointer().queries.get(), 0);

        assert_eq!(ctx.on_message(MessageKind::Mouse), Some(true));
        assert_eq!(ctx.subscription(), SubscriptionState::Subscribed);

        // Tray notifications always count as pointer activity.
        ctx.hover().pointer().move_to(10, 10);
        ctx.on_tray_event(TrayNotification::Leave);
        assert_eq!(ctx.subscription(), SubscriptionState::Unsubscribed);
    }

    #[test]
    fn test_unreadable_payload_is_ignored() {
        let mut ctx = context(&ScrollConfig::default());
        ctx.hover().pointer().move_to(1812, 1052);
        ctx.on_message(MessageKind::RawInput);
        assert_eq!(ctx.on_raw_input(None), None);
        assert_eq!(ctx.subscription(), SubscriptionState::Subscribed);
    }

    #[test]
    fn test_each_tick_reported_independently() {
        let mut ctx = context(&ScrollConfig::default());
        ctx.hover().pointer().move_to(1812, 1052);
        ctx.on_message(MessageKind::RawInput);

        let deltas: Vec<i16> = [120, 120, -240]
            .into_iter()
            .filter_map(|d| ctx.on_raw_input(wheel(d)).map(|t| t.delta))
            .collect();
        assert_eq!(deltas, vec![120, 120, -240]);
    }

    #[test]
    fn test_horizontal_wheel_follows_config() {
        let hwheel = Some(RawMouseEvent::mouse(RI_MOUSE_HWHEEL, 120));

        let mut vertical_only = context(&ScrollConfig::default());
        vertical_only.hover().pointer().move_to(1812, 1052);
        vertical_only.on_message(MessageKind::RawInput);
        assert_eq!(vertical_only.on_raw_input(hwheel), None);

        let mut both = context(&ScrollConfig {
            horizontal_wheel: true,
            ..ScrollConfig::default()
        });
        both.hover().pointer().move_to(1812, 1052);
        both.on_message(MessageKind::RawInput);
        let tick = both.on_raw_input(hwheel);
        assert_eq!(tick.map(|t| t.axis), Some(WheelAxis::Horizontal));
        assert_eq!(tick.map(|t| t.notches), Some(1.0));
    }

    #[test]
    fn test_icon_rect_failure_releases_listener() {
        let mut ctx = context(&ScrollConfig::default());
        ctx.hover().pointer().move_to(1812, 1052);
        ctx.on_message(MessageKind::Mouse);
        assert!(ctx.subscription().is_subscribed());

        ctx.hover().geometry().rect.set(None);
        assert_eq!(ctx.on_message(MessageKind::Other), Some(false));
        assert_eq!(ctx.subscription(), SubscriptionState::Unsubscribed);
    }

    #[test]
    fn test_teardown_releases_once() {
        let mut ctx = context(&ScrollConfig::default());
        ctx.hover().pointer().move_to(1812, 1052);
        ctx.on_message(MessageKind::Mouse);
        ctx.on_teardown();
        ctx.on_teardown();
        assert_eq!(ctx.subscription(), SubscriptionState::Unsubscribed);
        assert_eq!(
            ctx.registrar().calls,
            vec![Call::Subscribe, Call::Unsubscribe]
        );
    }
}
