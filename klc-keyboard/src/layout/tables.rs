//! Static slot orders and physical layouts
//!
//! Keycodes are USB HID usage IDs, except `0xf0` for the Fn key which the
//! controller lights like any other key.

use super::{Layout, Model, PhysicalKey, Region};
use crate::protocol::PacketGeometry;

use super::Region::{Alphanumeric as A, Enter as E, Modifiers as M, Special as S};

const fn key(name: &'static str, region: Region, keycode: u8) -> PhysicalKey {
    PhysicalKey {
        name,
        region,
        keycode,
    }
}

// ── Firmware slot orders (anchor, remaining slots) ──────────────────

const MODIFIERS_ANCHOR: u8 = 0xe0;
const MODIFIERS_SLOTS: &[u8] = &[
    0xe1, 0xe2, 0xe3, 0xe4, 0xe5, 0xe6, // shift/alt/gui/ctrl
    0xe7, // Right GUI: slot exists, no key on either model
    0x65, 0xf0, 0x29, 0x2b, 0x39, 0x2a, 0x2c,
];

const ALPHANUMERIC_ANCHOR: u8 = 0x04;
const ALPHANUMERIC_SLOTS: &[u8] = &[
    0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f, 0x10, 0x11, 0x12, 0x13,
    0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, // B..Z
    0x1e, 0x1f, 0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, // 1..0
];

const ENTER_ANCHOR: u8 = 0x28;
const ENTER_SLOTS: &[u8] = &[
    0x2d, 0x2e, 0x2f, 0x30, 0x31, //
    0x32, // ISO hash: slot only
    0x33, 0x34, 0x35, 0x36, 0x37, 0x38, //
    0x49, 0x4a, 0x4b, 0x4c, 0x4d, 0x4e, 0x4f, 0x50, 0x51, 0x52, // nav + arrows
    0x64, // ISO backslash: slot only
];

const SPECIAL_ANCHOR: u8 = 0x3a;
const SPECIAL_SLOTS: &[u8] = &[
    0x3b, 0x3c, 0x3d, 0x3e, 0x3f, 0x40, 0x41, 0x42, 0x43, 0x44, 0x45, // F2..F12
    0x46, 0x47, 0x48, // PrtSc, ScrLk, Pause
    0x53, 0x54, 0x55, 0x56, 0x57, 0x58, // NumLock, KP / * - + Enter
    0x59, 0x5a, 0x5b, 0x5c, 0x5d, 0x5e, 0x5f, 0x60, 0x61, 0x62, 0x63, // KP 1..0 .
];

pub(super) fn slots(region: Region) -> (u8, &'static [u8]) {
    match region {
        Region::Modifiers => (MODIFIERS_ANCHOR, MODIFIERS_SLOTS),
        Region::Alphanumeric => (ALPHANUMERIC_ANCHOR, ALPHANUMERIC_SLOTS),
        Region::Enter => (ENTER_ANCHOR, ENTER_SLOTS),
        Region::Special => (SPECIAL_ANCHOR, SPECIAL_SLOTS),
    }
}

// ── Shared row fragments ─────────────────────────────────────────────

const ESC: PhysicalKey = key("Esc", M, 0x29);
const PRINT_SCREEN: PhysicalKey = key("PrintScreen", S, 0x46);
const INSERT: PhysicalKey = key("Insert", E, 0x49);
const HOME: PhysicalKey = key("Home", E, 0x4a);
const PAGE_UP: PhysicalKey = key("PageUp", E, 0x4b);
const DELETE: PhysicalKey = key("Delete", E, 0x4c);
const END: PhysicalKey = key("End", E, 0x4d);
const PAGE_DOWN: PhysicalKey = key("PageDown", E, 0x4e);

// ── Full-size ────────────────────────────────────────────────────────

const FULL_ROW_0: &[PhysicalKey] = &[
    ESC,
    key("F1", S, 0x3a),
    key("F2", S, 0x3b),
    key("F3", S, 0x3c),
    key("F4", S, 0x3d),
    key("F5", S, 0x3e),
    key("F6", S, 0x3f),
    key("F7", S, 0x40),
    key("F8", S, 0x41),
    key("F9", S, 0x42),
    key("F10", S, 0x43),
    key("F11", S, 0x44),
    key("F12", S, 0x45),
    PRINT_SCREEN,
    key("ScrollLock", S, 0x47),
    key("Pause", S, 0x48),
    INSERT,
    DELETE,
];

const FULL_ROW_1: &[PhysicalKey] = &[
    key("Grave", E, 0x35),
    key("1", A, 0x1e),
    key("2", A, 0x1f),
    key("3", A, 0x20),
    key("4", A, 0x21),
    key("5", A, 0x22),
    key("6", A, 0x23),
    key("7", A, 0x24),
    key("8", A, 0x25),
    key("9", A, 0x26),
    key("0", A, 0x27),
    key("Minus", E, 0x2d),
    key("Equal", E, 0x2e),
    key("Backspace", M, 0x2a),
    HOME,
    key("NumLock", S, 0x53),
    key("KpDivide", S, 0x54),
    key("KpMultiply", S, 0x55),
    key("KpMinus", S, 0x56),
];

const FULL_ROW_2: &[PhysicalKey] = &[
    key("Tab", M, 0x2b),
    key("Q", A, 0x14),
    key("W", A, 0x1a),
    key("E", A, 0x08),
    key("R", A, 0x15),
    key("T", A, 0x17),
    key("Y", A, 0x1c),
    key("U", A, 0x18),
    key("I", A, 0x0c),
    key("O", A, 0x12),
    key("P", A, 0x13),
    key("LeftBracket", E, 0x2f),
    key("RightBracket", E, 0x30),
    key("Backslash", E, 0x31),
    PAGE_UP,
    key("Kp7", S, 0x5f),
    key("Kp8", S, 0x60),
    key("Kp9", S, 0x61),
    key("KpPlus", S, 0x57),
];

const FULL_ROW_3: &[PhysicalKey] = &[
    key("CapsLock", M, 0x39),
    key("A", A, 0x04),
    key("S", A, 0x16),
    key("D", A, 0x07),
    key("F", A, 0x09),
    key("G", A, 0x0a),
    key("H", A, 0x0b),
    key("J", A, 0x0d),
    key("K", A, 0x0e),
    key("L", A, 0x0f),
    key("Semicolon", E, 0x33),
    key("Apostrophe", E, 0x34),
    key("Enter", E, 0x28),
    PAGE_DOWN,
    key("Kp4", S, 0x5c),
    key("Kp5", S, 0x5d),
    key("Kp6", S, 0x5e),
];

const FULL_ROW_4: &[PhysicalKey] = &[
    key("LeftShift", M, 0xe1),
    key("Z", A, 0x1d),
    key("X", A, 0x1b),
    key("C", A, 0x06),
    key("V", A, 0x19),
    key("B", A, 0x05),
    key("N", A, 0x11),
    key("M", A, 0x10),
    key("Comma", E, 0x36),
    key("Period", E, 0x37),
    key("Slash", E, 0x38),
    key("RightShift", M, 0xe5),
    key("Up", E, 0x52),
    END,
    key("Kp1", S, 0x59),
    key("Kp2", S, 0x5a),
    key("Kp3", S, 0x5b),
    key("KpEnter", S, 0x58),
];

const FULL_ROW_5: &[PhysicalKey] = &[
    key("LeftCtrl", M, 0xe0),
    key("Fn", M, 0xf0),
    key("LeftGui", M, 0xe3),
    key("LeftAlt", M, 0xe2),
    key("Space", M, 0x2c),
    key("RightAlt", M, 0xe6),
    key("Menu", M, 0x65),
    key("RightCtrl", M, 0xe4),
    key("Left", E, 0x50),
    key("Down", E, 0x51),
    key("Right", E, 0x4f),
    key("Kp0", S, 0x62),
    key("KpPeriod", S, 0x63),
];

pub(super) static FULL_SIZE: Layout = Layout {
    model: Model::FullSize,
    rows: &[
        FULL_ROW_0, FULL_ROW_1, FULL_ROW_2, FULL_ROW_3, FULL_ROW_4, FULL_ROW_5,
    ],
    geometry: PacketGeometry::STANDARD,
};

// ── Compact ──────────────────────────────────────────────────────────

const COMPACT_ROW_0: &[PhysicalKey] = &[
    ESC,
    key("F1", S, 0x3a),
    key("F2", S, 0x3b),
    key("F3", S, 0x3c),
    key("F4", S, 0x3d),
    key("F5", S, 0x3e),
    key("F6", S, 0x3f),
    key("F7", S, 0x40),
    key("F8", S, 0x41),
    key("F9", S, 0x42),
    key("F10", S, 0x43),
    key("F11", S, 0x44),
    key("F12", S, 0x45),
    PRINT_SCREEN,
    INSERT,
    DELETE,
];

const COMPACT_ROW_1: &[PhysicalKey] = &[
    key("Grave", E, 0x35),
    key("1", A, 0x1e),
    key("2", A, 0x1f),
    key("3", A, 0x20),
    key("4", A, 0x21),
    key("5", A, 0x22),
    key("6", A, 0x23),
    key("7", A, 0x24),
    key("8", A, 0x25),
    key("9", A, 0x26),
    key("0", A, 0x27),
    key("Minus", E, 0x2d),
    key("Equal", E, 0x2e),
    key("Backspace", M, 0x2a),
    HOME,
];

const COMPACT_ROW_2: &[PhysicalKey] = &[
    key("Tab", M, 0x2b),
    key("Q", A, 0x14),
    key("W", A, 0x1a),
    key("E", A, 0x08),
    key("R", A, 0x15),
    key("T", A, 0x17),
    key("Y", A, 0x1c),
    key("U", A, 0x18),
    key("I", A, 0x0c),
    key("O", A, 0x12),
    key("P", A, 0x13),
    key("LeftBracket", E, 0x2f),
    key("RightBracket", E, 0x30),
    key("Backslash", E, 0x31),
    PAGE_UP,
];

const COMPACT_ROW_3: &[PhysicalKey] = &[
    key("CapsLock", M, 0x39),
    key("A", A, 0x04),
    key("S", A, 0x16),
    key("D", A, 0x07),
    key("F", A, 0x09),
    key("G", A, 0x0a),
    key("H", A, 0x0b),
    key("J", A, 0x0d),
    key("K", A, 0x0e),
    key("L", A, 0x0f),
    key("Semicolon", E, 0x33),
    key("Apostrophe", E, 0x34),
    key("Enter", E, 0x28),
    PAGE_DOWN,
];

const COMPACT_ROW_4: &[PhysicalKey] = &[
    key("LeftShift", M, 0xe1),
    key("Z", A, 0x1d),
    key("X", A, 0x1b),
    key("C", A, 0x06),
    key("V", A, 0x19),
    key("B", A, 0x05),
    key("N", A, 0x11),
    key("M", A, 0x10),
    key("Comma", E, 0x36),
    key("Period", E, 0x37),
    key("Slash", E, 0x38),
    key("RightShift", M, 0xe5),
    key("Up", E, 0x52),
    END,
];

const COMPACT_ROW_5: &[PhysicalKey] = &[
    key("LeftCtrl", M, 0xe0),
    key("Fn", M, 0xf0),
    key("LeftGui", M, 0xe3),
    key("LeftAlt", M, 0xe2),
    key("Space", M, 0x2c),
    key("RightAlt", M, 0xe6),
    key("RightCtrl", M, 0xe4),
    key("Left", E, 0x50),
    key("Down", E, 0x51),
    key("Right", E, 0x4f),
];

pub(super) static COMPACT: Layout = Layout {
    model: Model::Compact,
    rows: &[
        COMPACT_ROW_0,
        COMPACT_ROW_1,
        COMPACT_ROW_2,
        COMPACT_ROW_3,
        COMPACT_ROW_4,
        COMPACT_ROW_5,
    ],
    geometry: PacketGeometry::STANDARD,
};
