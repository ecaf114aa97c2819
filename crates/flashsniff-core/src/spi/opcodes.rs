//! SPI-NOR flash opcodes recognised by the built-in command set
//!
//! Standard JEDEC opcodes plus the ISSI IS25LP128F extensions. A few
//! opcodes are named after what the IS25LP128F does with them rather than
//! their JEDEC meaning (0x20 and 0xD8 take 4-byte addresses there).

// ============================================================================
// Write control
// ============================================================================

/// Write Enable
pub const WREN: u8 = 0x06;
/// Write Disable
pub const WRDI: u8 = 0x04;

// ============================================================================
// Status register operations
// ============================================================================

/// Read Status Register 1
pub const RDSR: u8 = 0x05;
/// Read Status Register 2
pub const RDSR2: u8 = 0x35;
/// Write Status Register 1
pub const WRSR: u8 = 0x01;

// ============================================================================
// Identification
// ============================================================================

/// Read JEDEC ID
pub const RDID: u8 = 0x9F;
/// Read JEDEC ID (multiple I/O variant)
pub const RDID_MIO: u8 = 0x9E;
/// Release from Deep Power Down / Read Electronic Signature
pub const RES: u8 = 0xAB;

// ============================================================================
// Read commands
// ============================================================================

/// Read Data
pub const READ: u8 = 0x03;
/// Fast Read (one dummy byte after the address)
pub const FAST_READ: u8 = 0x0B;
/// Read Data with 4-byte address
pub const READ_4B: u8 = 0x13;
/// Quad Output Read (1-1-4)
pub const QOR: u8 = 0x6B;
/// Quad I/O Word Read
pub const QWR: u8 = 0xE7;
/// Quad I/O Read (1-4-4)
pub const QIOR: u8 = 0xEB;

// ============================================================================
// Page Program
// ============================================================================

/// Page Program with 3-byte address
pub const PP: u8 = 0x02;
/// Page Program with 4-byte address
pub const PP_4B: u8 = 0x12;
/// Quad Page Program with 3-byte address
pub const QPP: u8 = 0x32;
/// Quad Page Program with 4-byte address
pub const QPP_4B: u8 = 0x34;

// ============================================================================
// Erase commands
// ============================================================================

/// Sector Erase 4KB
pub const SE_20: u8 = 0x20;
/// Block Erase 32KB with 4-byte address
pub const BE_5C: u8 = 0x5C;
/// Block Erase 64KB
pub const BE_D8: u8 = 0xD8;

// ============================================================================
// Advanced sector protection (IS25LP128F)
// ============================================================================

/// Write DYB register with 4-byte address
pub const WRDYB_4B: u8 = 0xE1;
/// Program PPB with 4-byte address
pub const PGPPB_4B: u8 = 0xE3;

// ============================================================================
// Read parameters (IS25LP128F)
// ============================================================================

/// Set Read Parameters
pub const SRP: u8 = 0xC0;
/// Read Read Parameters
pub const RDRP: u8 = 0x61;
/// Read Extended Read Parameters
pub const RDERP: u8 = 0x85;

// ============================================================================
// 4-byte address mode control
// ============================================================================

/// Enter 4-Byte Address Mode
pub const EN4B: u8 = 0xB7;
/// Exit 4-Byte Address Mode
pub const EX4B: u8 = 0xE9;

// ============================================================================
// SFDP (Serial Flash Discoverable Parameters)
// ============================================================================

/// Read SFDP (JEDEC JESD216)
pub const RDSFDP: u8 = 0x5A;
/// Read SFDP, data-bearing variant
pub const RDSFDP_DATA: u8 = 0x5B;

// ============================================================================
// Suspend
// ============================================================================

/// Program Suspend
pub const SUSPEND: u8 = 0x75;

// ============================================================================
// Continuous read mode
// ============================================================================

/// Upper nibble of the mode byte that keeps a quad read in continuous mode
pub const CONTINUOUS_MODE_BITS: u8 = 0xA0;
