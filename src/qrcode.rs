#![forbid(unsafe_code)]
//! QR Code Model 2 symbol construction.
//!
//! Payloads are always encoded as a single byte-mode segment: text is written as its UTF-8 bytes,
//! so the symbol capacity of interest is the byte capacity of a version at an error correction
//! level. The smallest version in the requested range that holds the payload is chosen and the
//! error correction level is never raised behind the caller's back.

/// A QR Code symbol, a square grid of dark and light modules.
///
/// Instances are immutable once built. Identical input always yields an identical grid, since both
/// version selection and mask selection are deterministic.
///
/// # Example
///
/// ```rust
/// use longqr::qrcode::{QrCode, QrCodeEcc, Version};
///
/// let qr = QrCode::encode_bytes(b"Hello, world!", QrCodeEcc::Medium, Version::MIN, Version::MAX)
///     .unwrap();
///
/// assert_eq!(qr.version(), Version::new(1));
/// assert_eq!(qr.size(), 21);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrCode {
    version: Version,

    /// Width and height in modules, between 21 and 177 (inclusive). Equal to version * 4 + 17.
    size: i32,

    ecl: QrCodeEcc,

    mask: Mask,

    /// Row-major module colors, `true` is dark.
    modules: Vec<bool>,

    /// Marks finder/timing/alignment/format/version modules while the symbol is being drawn.
    /// Emptied when construction finishes.
    isfunction: Vec<bool>,
}

impl QrCode {
    /// Encodes UTF-8 text at the given error correction level, using any version from 1 to 40.
    pub fn encode_text(text: &str, ecl: QrCodeEcc) -> Result<Self, DataTooLong> {
        Self::encode_bytes(text.as_bytes(), ecl, Version::MIN, Version::MAX)
    }

    /// Encodes `data` as one byte-mode segment.
    ///
    /// The smallest version within `minversion..=maxversion` whose data capacity holds the segment
    /// is used. The mask pattern is picked automatically by lowest penalty score.
    ///
    /// # Errors
    ///
    /// Returns [`DataTooLong`] when no version in the range can hold the data at `ecl`.
    ///
    /// # Panics
    ///
    /// Panics if `minversion > maxversion`.
    pub fn encode_bytes(
        data: &[u8],
        ecl: QrCodeEcc,
        minversion: Version,
        maxversion: Version,
    ) -> Result<Self, DataTooLong> {
        assert!(minversion <= maxversion, "Invalid version range");

        let mut version = minversion;
        let usedbits = loop {
            let capacitybits = Self::num_data_codewords(version, ecl) * 8;
            let used = byte_segment_bits(data.len(), version);
            match used {
                Some(n) if n <= capacitybits => break n,
                _ if version >= maxversion => {
                    return Err(match used {
                        None => DataTooLong::SegmentTooLong,
                        Some(n) => DataTooLong::DataOverCapacity(n, capacitybits),
                    });
                }
                _ => version = Version::new(version.value() + 1),
            }
        };

        let capacitybits = Self::num_data_codewords(version, ecl) * 8;
        let mut bb = BitBuffer::with_capacity(capacitybits / 8);
        bb.append_bits(MODE_BYTE, 4);
        bb.append_bits(data.len() as u32, byte_char_count_bits(version));
        for &b in data {
            bb.append_bits(b.into(), 8);
        }
        debug_assert_eq!(bb.len(), usedbits);

        // Terminator, then pad to a byte boundary
        let numzerobits = core::cmp::min(4, capacitybits - bb.len());
        bb.append_bits(0, numzerobits as u8);
        let numzerobits = bb.len().wrapping_neg() & 7;
        bb.append_bits(0, numzerobits as u8);
        debug_assert_eq!(bb.len() % 8, 0);

        for &padbyte in [0xEC, 0x11].iter().cycle() {
            if bb.len() >= capacitybits {
                break;
            }
            bb.append_bits(padbyte, 8);
        }

        Ok(Self::from_codewords(version, ecl, &bb.into_bytes()))
    }

    /// Largest byte-mode payload that fits in `version` at `ecl`.
    ///
    /// ```rust
    /// use longqr::qrcode::{QrCode, QrCodeEcc, Version};
    ///
    /// assert_eq!(QrCode::byte_capacity(Version::MAX, QrCodeEcc::Medium), 2331);
    /// ```
    pub fn byte_capacity(version: Version, ecl: QrCodeEcc) -> usize {
        let ccbits = byte_char_count_bits(version);
        let capacitybits = Self::num_data_codewords(version, ecl) * 8;
        let bycapacity = (capacitybits - 4 - usize::from(ccbits)) / 8;
        let bycount = (1usize << ccbits) - 1;
        bycapacity.min(bycount)
    }

    /// Version of this symbol, in the range [1, 40].
    pub fn version(&self) -> Version {
        self.version
    }

    /// Side length in modules of any symbol of `version`.
    pub fn side(version: Version) -> u32 {
        u32::from(version.value()) * 4 + 17
    }

    /// Side length of this symbol in modules, in the range [21, 177].
    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn error_correction_level(&self) -> QrCodeEcc {
        self.ecl
    }

    pub fn mask(&self) -> Mask {
        self.mask
    }

    /// Returns the color of the module at (x, y), `true` for dark.
    ///
    /// Coordinates outside the symbol read as light, which lets renderers treat the quiet zone
    /// uniformly.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        let range = 0..self.size;
        range.contains(&x) && range.contains(&y) && self.module(x, y)
    }

    fn from_codewords(version: Version, ecl: QrCodeEcc, datacodewords: &[u8]) -> Self {
        let size = Self::side(version) as i32;
        let cells = (size * size) as usize;
        let mut result = Self {
            version,
            size,
            ecl,
            mask: Mask::new(0),
            modules: vec![false; cells],
            isfunction: vec![false; cells],
        };

        result.draw_function_patterns();
        let allcodewords = Self::add_ecc_and_interleave(datacodewords, version, ecl);
        result.draw_codewords(&allcodewords);

        let mut best = (i32::MAX, Mask::new(0));
        for i in 0u8..8 {
            let mask = Mask::new(i);
            result.apply_mask(mask);
            result.draw_format_bits(mask);
            let penalty = result.penalty_score();
            if penalty < best.0 {
                best = (penalty, mask);
            }
            result.apply_mask(mask); // XOR undoes it
        }
        result.mask = best.1;
        result.apply_mask(best.1);
        result.draw_format_bits(best.1);
        result.isfunction = Vec::new();
        result
    }

    fn index(&self, x: i32, y: i32) -> usize {
        (y * self.size + x) as usize
    }

    fn module(&self, x: i32, y: i32) -> bool {
        self.modules[self.index(x, y)]
    }

    fn set_function_module(&mut self, x: i32, y: i32, isdark: bool) {
        let i = self.index(x, y);
        self.modules[i] = isdark;
        self.isfunction[i] = true;
    }

    fn draw_function_patterns(&mut self) {
        let size = self.size;
        for i in 0..size {
            self.set_function_module(6, i, i % 2 == 0);
            self.set_function_module(i, 6, i % 2 == 0);
        }

        self.draw_finder_pattern(3, 3);
        self.draw_finder_pattern(size - 4, 3);
        self.draw_finder_pattern(3, size - 4);

        // Alignment patterns, skipping the three that would overlap finders
        let alignpatpos = self.alignment_pattern_positions();
        let last = alignpatpos.len().saturating_sub(1);
        for (i, &x) in alignpatpos.iter().enumerate() {
            for (j, &y) in alignpatpos.iter().enumerate() {
                let overlapsfinder = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
                if !overlapsfinder {
                    self.draw_alignment_pattern(x, y);
                }
            }
        }

        // Reserve the format area with a throwaway mask; the real bits are drawn after masking
        self.draw_format_bits(Mask::new(0));
        self.draw_version();
    }

    fn draw_finder_pattern(&mut self, x: i32, y: i32) {
        let range = 0..self.size;
        for dy in -4..=4 {
            for dx in -4..=4 {
                let (xx, yy) = (x + dx, y + dy);
                if range.contains(&xx) && range.contains(&yy) {
                    let dist = dx.abs().max(dy.abs());
                    self.set_function_module(xx, yy, dist != 2 && dist != 4);
                }
            }
        }
    }

    fn draw_alignment_pattern(&mut self, x: i32, y: i32) {
        for dy in -2i32..=2 {
            for dx in -2i32..=2 {
                let dist = i32::max(dx.abs(), dy.abs());
                self.set_function_module(x + dx, y + dy, dist != 1);
            }
        }
    }

    fn draw_format_bits(&mut self, mask: Mask) {
        let bits: u32 = {
            let data = u32::from((self.ecl.format_bits() << 3) | mask.value());
            let mut rem = data;
            for _ in 0..10 {
                rem = (rem << 1) ^ ((rem >> 9) * 0x537);
            }
            ((data << 10) | rem) ^ 0x5412
        };

        // Around the top-left finder
        for i in 0..6 {
            self.set_function_module(8, i, get_bit(bits, i));
        }
        self.set_function_module(8, 7, get_bit(bits, 6));
        self.set_function_module(8, 8, get_bit(bits, 7));
        self.set_function_module(7, 8, get_bit(bits, 8));
        for i in 9..15 {
            self.set_function_module(14 - i, 8, get_bit(bits, i));
        }

        // Split between the other two finders
        let size = self.size;
        for i in 0..8 {
            self.set_function_module(size - 1 - i, 8, get_bit(bits, i));
        }
        for i in 8..15 {
            self.set_function_module(8, size - 15 + i, get_bit(bits, i));
        }
        self.set_function_module(8, size - 8, true);
    }

    fn draw_version(&mut self) {
        let ver = u32::from(self.version.value());
        if ver < 7 {
            return;
        }
        let bits: u32 = {
            let mut rem = ver;
            for _ in 0..12 {
                rem = (rem << 1) ^ ((rem >> 11) * 0x1F25);
            }
            (ver << 12) | rem
        };
        for i in 0..18 {
            let bit = get_bit(bits, i);
            let a = self.size - 11 + i % 3;
            let b = i / 3;
            self.set_function_module(a, b, bit);
            self.set_function_module(b, a, bit);
        }
    }

    fn draw_codewords(&mut self, data: &[u8]) {
        debug_assert_eq!(data.len(), Self::num_raw_data_modules(self.version) / 8);
        let size = self.size;
        let totalbits = data.len() * 8;
        let mut i: usize = 0;
        let mut right = size - 1;
        while right >= 1 {
            if right == 6 {
                right = 5;
            }
            let upward = ((right + 1) & 2) == 0;
            for vert in 0..size {
                for j in 0..2 {
                    let x = right - j;
                    let y = if upward { size - 1 - vert } else { vert };
                    let idx = self.index(x, y);
                    if !self.isfunction[idx] && i < totalbits {
                        self.modules[idx] = get_bit(data[i >> 3].into(), 7 - (i & 7) as i32);
                        i += 1;
                    }
                    // Remainder bits stay light
                }
            }
            right -= 2;
        }
        debug_assert_eq!(i, totalbits);
    }

    fn apply_mask(&mut self, mask: Mask) {
        for y in 0..self.size {
            for x in 0..self.size {
                let idx = self.index(x, y);
                if self.isfunction[idx] {
                    continue;
                }
                let invert = match mask.value() {
                    0 => (x + y) % 2 == 0,
                    1 => y % 2 == 0,
                    2 => x % 3 == 0,
                    3 => (x + y) % 3 == 0,
                    4 => (x / 3 + y / 2) % 2 == 0,
                    5 => (x * y) % 2 + (x * y) % 3 == 0,
                    6 => ((x * y) % 2 + (x * y) % 3) % 2 == 0,
                    7 => ((x + y) % 2 + (x * y) % 3) % 2 == 0,
                    _ => unreachable!(),
                };
                self.modules[idx] ^= invert;
            }
        }
    }

    fn penalty_score(&self) -> i32 {
        let size = self.size;
        let mut result: i32 = 0;

        // Runs and finder-like patterns, rows then columns
        for transpose in [false, true] {
            for a in 0..size {
                let mut runcolor = false;
                let mut runlen: i32 = 0;
                let mut runhistory = FinderPenalty::new(size);
                for b in 0..size {
                    let color = if transpose { self.module(a, b) } else { self.module(b, a) };
                    if color == runcolor {
                        runlen += 1;
                        if runlen == 5 {
                            result += PENALTY_N1;
                        } else if runlen > 5 {
                            result += 1;
                        }
                    } else {
                        runhistory.add_history(runlen);
                        if !runcolor {
                            result += runhistory.count_patterns() * PENALTY_N3;
                        }
                        runcolor = color;
                        runlen = 1;
                    }
                }
                result += runhistory.terminate_and_count(runcolor, runlen) * PENALTY_N3;
            }
        }

        for y in 0..size - 1 {
            for x in 0..size - 1 {
                let color = self.module(x, y);
                if color == self.module(x + 1, y)
                    && color == self.module(x, y + 1)
                    && color == self.module(x + 1, y + 1)
                {
                    result += PENALTY_N2;
                }
            }
        }

        let dark = self.modules.iter().filter(|&&m| m).count() as i32;
        let total = size * size;
        let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
        result + k * PENALTY_N4
    }

    fn alignment_pattern_positions(&self) -> Vec<i32> {
        let ver = i32::from(self.version.value());
        if ver == 1 {
            return Vec::new();
        }
        let numalign = ver / 7 + 2;
        let step = (ver * 8 + numalign * 3 + 5) / (numalign * 4 - 4) * 2;
        let mut result: Vec<i32> = (0..numalign - 1).map(|i| self.size - 7 - i * step).collect();
        result.push(6);
        result.reverse();
        result
    }

    fn add_ecc_and_interleave(data: &[u8], ver: Version, ecl: QrCodeEcc) -> Vec<u8> {
        assert_eq!(data.len(), Self::num_data_codewords(ver, ecl));

        let numblocks = table_get(&NUM_ERROR_CORRECTION_BLOCKS, ver, ecl);
        let blockecclen = table_get(&ECC_CODEWORDS_PER_BLOCK, ver, ecl);
        let rawcodewords = Self::num_raw_data_modules(ver) / 8;
        let numshortblocks = numblocks - rawcodewords % numblocks;
        let shortblocklen = rawcodewords / numblocks;

        // Short blocks get a placeholder byte so every block has the same length
        let rs = ReedSolomonGenerator::new(blockecclen);
        let mut blocks: Vec<Vec<u8>> = Vec::with_capacity(numblocks);
        let mut k = 0;
        for i in 0..numblocks {
            let datlen = shortblocklen - blockecclen + usize::from(i >= numshortblocks);
            let mut block = data[k..k + datlen].to_vec();
            k += datlen;
            let ecc = rs.remainder(&block);
            if i < numshortblocks {
                block.push(0);
            }
            block.extend_from_slice(&ecc);
            blocks.push(block);
        }

        let mut result = Vec::with_capacity(rawcodewords);
        for i in 0..=shortblocklen {
            for (j, block) in blocks.iter().enumerate() {
                if i != shortblocklen - blockecclen || j >= numshortblocks {
                    result.push(block[i]);
                }
            }
        }
        debug_assert_eq!(result.len(), rawcodewords);
        result
    }

    /// Number of data bits available in a symbol of this version, after all function modules are
    /// excluded. Includes remainder bits.
    fn num_raw_data_modules(ver: Version) -> usize {
        let ver = usize::from(ver.value());
        let mut result = (16 * ver + 128) * ver + 64;
        if ver >= 2 {
            let numalign = ver / 7 + 2;
            result -= (25 * numalign - 10) * numalign - 55;
            if ver >= 7 {
                result -= 36;
            }
        }
        result
    }

    fn num_data_codewords(ver: Version, ecl: QrCodeEcc) -> usize {
        Self::num_raw_data_modules(ver) / 8
            - table_get(&ECC_CODEWORDS_PER_BLOCK, ver, ecl) * table_get(&NUM_ERROR_CORRECTION_BLOCKS, ver, ecl)
    }
}

const MODE_BYTE: u32 = 0x4;

fn byte_char_count_bits(ver: Version) -> u8 {
    [8, 16, 16][usize::from((ver.value() + 7) / 17)]
}

/// Bits taken by a byte-mode segment of `len` bytes, or `None` if the count field cannot hold
/// `len` at this version.
fn byte_segment_bits(len: usize, ver: Version) -> Option<usize> {
    let ccbits = byte_char_count_bits(ver);
    if len >= 1usize << ccbits {
        return None;
    }
    len.checked_mul(8)?.checked_add(4 + usize::from(ccbits))
}

fn table_get(table: &'static [[u8; 41]; 4], ver: Version, ecl: QrCodeEcc) -> usize {
    usize::from(table[ecl.ordinal()][usize::from(ver.value())])
}

struct ReedSolomonGenerator {
    /// Divisor polynomial coefficients, highest power first, leading 1 omitted.
    divisor: Vec<u8>,
}

impl ReedSolomonGenerator {
    fn new(degree: usize) -> Self {
        assert!((1..=255).contains(&degree), "Degree out of range");
        let mut divisor = vec![0u8; degree];
        divisor[degree - 1] = 1;
        let mut root: u8 = 1;
        for _ in 0..degree {
            for j in 0..degree {
                divisor[j] = Self::multiply(divisor[j], root);
                if j + 1 < degree {
                    divisor[j] ^= divisor[j + 1];
                }
            }
            root = Self::multiply(root, 0x02);
        }
        Self { divisor }
    }

    fn remainder(&self, data: &[u8]) -> Vec<u8> {
        let mut result = vec![0u8; self.divisor.len()];
        for &b in data {
            let factor = b ^ result.remove(0);
            result.push(0);
            for (x, &y) in result.iter_mut().zip(&self.divisor) {
                *x ^= Self::multiply(y, factor);
            }
        }
        result
    }

    /// Product in GF(2^8) modulo x^8 + x^4 + x^3 + x^2 + 1.
    fn multiply(x: u8, y: u8) -> u8 {
        let mut z: u8 = 0;
        for i in (0..8).rev() {
            z = (z << 1) ^ ((z >> 7) * 0x1D);
            z ^= ((y >> i) & 1) * x;
        }
        z
    }
}

struct FinderPenalty {
    qr_size: i32,
    run_history: [i32; 7],
}

impl FinderPenalty {
    fn new(size: i32) -> Self {
        Self { qr_size: size, run_history: [0; 7] }
    }

    fn add_history(&mut self, mut currentrunlength: i32) {
        if self.run_history[0] == 0 {
            currentrunlength += self.qr_size; // light border
        }
        self.run_history.copy_within(0..6, 1);
        self.run_history[0] = currentrunlength;
    }

    fn count_patterns(&self) -> i32 {
        let rh = &self.run_history;
        let n = rh[1];
        let core = n > 0 && rh[2] == n && rh[3] == n * 3 && rh[4] == n && rh[5] == n;
        i32::from(core && rh[0] >= n * 4 && rh[6] >= n) + i32::from(core && rh[6] >= n * 4 && rh[0] >= n)
    }

    fn terminate_and_count(mut self, currentruncolor: bool, mut currentrunlength: i32) -> i32 {
        if currentruncolor {
            self.add_history(currentrunlength);
            currentrunlength = 0;
        }
        currentrunlength += self.qr_size;
        self.add_history(currentrunlength);
        self.count_patterns()
    }
}

const PENALTY_N1: i32 = 3;
const PENALTY_N2: i32 = 3;
const PENALTY_N3: i32 = 40;
const PENALTY_N4: i32 = 10;

// Indexed by [ecl.ordinal()][version]; column 0 is padding.
static ECC_CODEWORDS_PER_BLOCK: [[u8; 41]; 4] = [
    // Low
    [
        0, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28,
        28, 28, 30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    // Medium
    [
        0, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26,
        26, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ],
    // Quartile
    [
        0, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30,
        28, 30, 30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
    // High
    [
        0, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28,
        30, 24, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ],
];

static NUM_ERROR_CORRECTION_BLOCKS: [[u8; 41]; 4] = [
    // Low
    [
        0, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8,
        8, 9, 9, 10, 12, 12, 12, 13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    // Medium
    [
        0, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16,
        17, 17, 18, 20, 21, 23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    // Quartile
    [
        0, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20,
        23, 23, 25, 27, 29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    // High
    [
        0, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25,
        25, 34, 30, 32, 35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];

/// Error correction level of a QR symbol.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub enum QrCodeEcc {
    /// Tolerates ~7% erroneous codewords.
    Low,
    /// Tolerates ~15% erroneous codewords.
    Medium,
    /// Tolerates ~25% erroneous codewords.
    Quartile,
    /// Tolerates ~30% erroneous codewords.
    High,
}

impl QrCodeEcc {
    fn ordinal(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::Quartile => 2,
            Self::High => 3,
        }
    }

    /// The 2-bit value written into the format information.
    fn format_bits(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 0,
            Self::Quartile => 3,
            Self::High => 2,
        }
    }
}

struct BitBuffer {
    bytes: Vec<u8>,
    length: usize,
}

impl BitBuffer {
    fn with_capacity(bytes: usize) -> Self {
        Self { bytes: Vec::with_capacity(bytes), length: 0 }
    }

    fn len(&self) -> usize {
        self.length
    }

    /// Appends the low `len` bits of `val`, most significant first.
    fn append_bits(&mut self, val: u32, len: u8) {
        assert!(len <= 31 && (val >> len) == 0, "Value out of range");
        for i in (0..len).rev() {
            if self.length % 8 == 0 {
                self.bytes.push(0);
            }
            let bit = ((val >> i) & 1) as u8;
            let last = self.bytes.len() - 1;
            self.bytes[last] |= bit << (7 - (self.length & 7));
            self.length += 1;
        }
    }

    fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// The payload does not fit in any symbol of the permitted version range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataTooLong {
    /// The byte count exceeds what the character count field can express.
    SegmentTooLong,
    /// Data length in bits, and the capacity in bits of the largest permitted version.
    DataOverCapacity(usize, usize),
}

impl core::fmt::Display for DataTooLong {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Self::SegmentTooLong => write!(f, "Segment too long"),
            Self::DataOverCapacity(datalen, maxcapacity) => {
                write!(f, "Data length = {} bits, Max capacity = {} bits", datalen, maxcapacity)
            }
        }
    }
}

impl std::error::Error for DataTooLong {}

/// A QR symbol version (1–40).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Version(u8);

impl Version {
    pub const MIN: Version = Version(1);

    pub const MAX: Version = Version(40);

    /// # Panics
    ///
    /// Panics if the number is outside the range [1, 40].
    pub const fn new(ver: u8) -> Self {
        assert!(Version::MIN.value() <= ver && ver <= Version::MAX.value(), "Version number out of range");
        Self(ver)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

/// A mask pattern (0–7).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Mask(u8);

impl Mask {
    /// # Panics
    ///
    /// Panics if the number is outside the range [0, 7].
    pub const fn new(mask: u8) -> Self {
        assert!(mask <= 7, "Mask value out of range");
        Self(mask)
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

fn get_bit(x: u32, i: i32) -> bool {
    ((x >> i) & 1) != 0
}
