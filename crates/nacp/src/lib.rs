//! NACP (application control property) descriptor parser
//!
//! Every Switch application carries a `control.nacp`: a fixed 0x4000-byte
//! little-endian descriptor holding localized title records, launch and
//! capture policies, rating ages, and storage sizing. This crate parses that
//! layout into an owned struct; it does not read the descriptor out of its
//! container (that is the caller's job) and it does not touch the JPEG icons
//! stored alongside it.
//!
//! Raw policy fields are kept as the integers found on disk; the enums in
//! [`policy`] decode them, with unknown values preserved rather than
//! rejected.

pub mod error;
pub mod language;
pub mod policy;

pub use error::{Error, Result};
pub use language::Language;

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read, Seek, SeekFrom};

/// Exact byte length of a NACP descriptor.
pub const NACP_SIZE: usize = 0x4000;

/// One localized title record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub name: String,
    pub publisher: String,
}

/// Minimum age per rating organization. `0` means unrated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingAge {
    pub cero: u8,
    pub gracgcrb: u8,
    pub gsrmr: u8,
    pub esrb: u8,
    pub class_ind: u8,
    pub usk: u8,
    pub pegi: u8,
    pub pegi_portugal: u8,
    pub pegibbfc: u8,
    pub russian: u8,
    pub acb: u8,
    pub oflc: u8,
    pub iarc_generic: u8,
}

/// JIT permissions granted to the application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JitConfiguration {
    pub flags: u64,
    pub memory_size: u64,
}

/// Parsed NACP descriptor.
///
/// Scalar policy fields keep their raw on-disk values; see [`policy`] for
/// the decoders.
#[derive(Debug, Clone, PartialEq)]
pub struct Nacp {
    titles: Vec<Option<Title>>,
    pub isbn: String,
    pub startup_user_account: u8,
    pub user_account_switch_lock: u8,
    pub add_on_content_registration_type: u8,
    pub attribute: u32,
    pub supported_language: u32,
    pub parental_control: u32,
    pub screenshot: u8,
    pub video_capture: u8,
    pub data_loss_confirmation: u8,
    pub play_log_policy: u8,
    pub presence_group_id: u64,
    pub rating_age: RatingAge,
    pub display_version: String,
    pub add_on_content_base_id: u64,
    pub save_data_owner_id: u64,
    pub user_account_save_data_size: u64,
    pub user_account_save_data_journal_size: u64,
    pub device_save_data_size: u64,
    pub device_save_data_journal_size: u64,
    pub bcat_delivery_cache_storage_size: u64,
    pub application_error_code_category: String,
    pub local_communication_id: [u64; 8],
    pub logo_type: u8,
    pub logo_handling: u8,
    pub runtime_add_on_content_install: u8,
    pub runtime_parameter_delivery: u8,
    pub crash_report: u8,
    pub hdcp: u8,
    pub seed_for_pseudo_device_id: u64,
    pub bcat_passphrase: String,
    pub startup_user_account_option: u8,
    pub user_account_save_data_size_max: u64,
    pub user_account_save_data_journal_size_max: u64,
    pub device_save_data_size_max: u64,
    pub device_save_data_journal_size_max: u64,
    pub temporary_storage_size: u64,
    pub cache_storage_size: u64,
    pub cache_storage_journal_size: u64,
    pub cache_storage_data_and_journal_size_max: u64,
    pub cache_storage_index_max: u16,
    pub play_log_queryable_application_id: [u64; 16],
    pub play_log_query_capability: u8,
    pub repair: u8,
    pub program_index: u8,
    pub required_network_service_license_on_launch: u8,
    pub jit_configuration: JitConfiguration,
    pub play_report_permission: u8,
    pub crash_screenshot_for_prod: u8,
    pub crash_screenshot_for_dev: u8,
    pub accessible_launch_required_version: [u64; 8],
}

/// Attribute flag bits.
pub const ATTRIBUTE_DEMO: u32 = 1 << 0;
pub const ATTRIBUTE_RETAIL_INTERACTIVE_DISPLAY: u32 = 1 << 1;

/// Parental-control flag bits.
pub const PARENTAL_CONTROL_FREE_COMMUNICATION: u32 = 1 << 0;

impl Nacp {
    /// Parse a full NACP descriptor.
    ///
    /// The buffer must be exactly [`NACP_SIZE`] bytes.
    pub fn parse(data: &[u8]) -> Result<Nacp> {
        if data.len() != NACP_SIZE {
            return Err(Error::InvalidSize {
                expected: NACP_SIZE,
                actual: data.len(),
            });
        }

        let mut cur = Cursor::new(data);

        let mut titles = Vec::with_capacity(Language::ALL.len());
        for _ in Language::ALL {
            let name = read_string(&mut cur, 0x200)?;
            let publisher = read_string(&mut cur, 0x100)?;
            titles.push(if name.is_empty() {
                None
            } else {
                Some(Title { name, publisher })
            });
        }

        let isbn = read_string(&mut cur, 0x25)?;
        let startup_user_account = cur.read_u8()?;
        let user_account_switch_lock = cur.read_u8()?;
        let add_on_content_registration_type = cur.read_u8()?;
        let attribute = cur.read_u32::<LittleEndian>()?;
        let supported_language = cur.read_u32::<LittleEndian>()?;
        let parental_control = cur.read_u32::<LittleEndian>()?;
        let screenshot = cur.read_u8()?;
        let video_capture = cur.read_u8()?;
        let data_loss_confirmation = cur.read_u8()?;
        let play_log_policy = cur.read_u8()?;
        let presence_group_id = cur.read_u64::<LittleEndian>()?;

        let mut ages = [0u8; 13];
        cur.read_exact(&mut ages)?;
        let rating_age = RatingAge {
            cero: ages[0],
            gracgcrb: ages[1],
            gsrmr: ages[2],
            esrb: ages[3],
            class_ind: ages[4],
            usk: ages[5],
            pegi: ages[6],
            pegi_portugal: ages[7],
            pegibbfc: ages[8],
            russian: ages[9],
            acb: ages[10],
            oflc: ages[11],
            iarc_generic: ages[12],
        };
        skip(&mut cur, 0x13)?;

        let display_version = read_string(&mut cur, 0x10)?;
        let add_on_content_base_id = cur.read_u64::<LittleEndian>()?;
        let save_data_owner_id = cur.read_u64::<LittleEndian>()?;
        let user_account_save_data_size = cur.read_u64::<LittleEndian>()?;
        let user_account_save_data_journal_size = cur.read_u64::<LittleEndian>()?;
        let device_save_data_size = cur.read_u64::<LittleEndian>()?;
        let device_save_data_journal_size = cur.read_u64::<LittleEndian>()?;
        let bcat_delivery_cache_storage_size = cur.read_u64::<LittleEndian>()?;
        let application_error_code_category = read_string(&mut cur, 0x8)?;

        let mut local_communication_id = [0u64; 8];
        for id in &mut local_communication_id {
            *id = cur.read_u64::<LittleEndian>()?;
        }

        let logo_type = cur.read_u8()?;
        let logo_handling = cur.read_u8()?;
        let runtime_add_on_content_install = cur.read_u8()?;
        let runtime_parameter_delivery = cur.read_u8()?;
        skip(&mut cur, 0x2)?;
        let crash_report = cur.read_u8()?;
        let hdcp = cur.read_u8()?;
        let seed_for_pseudo_device_id = cur.read_u64::<LittleEndian>()?;
        let bcat_passphrase = read_string(&mut cur, 0x41)?;
        let startup_user_account_option = cur.read_u8()?;
        skip(&mut cur, 0x6)?;

        let user_account_save_data_size_max = cur.read_u64::<LittleEndian>()?;
        let user_account_save_data_journal_size_max = cur.read_u64::<LittleEndian>()?;
        let device_save_data_size_max = cur.read_u64::<LittleEndian>()?;
        let device_save_data_journal_size_max = cur.read_u64::<LittleEndian>()?;
        let temporary_storage_size = cur.read_u64::<LittleEndian>()?;
        let cache_storage_size = cur.read_u64::<LittleEndian>()?;
        let cache_storage_journal_size = cur.read_u64::<LittleEndian>()?;
        let cache_storage_data_and_journal_size_max = cur.read_u64::<LittleEndian>()?;
        let cache_storage_index_max = cur.read_u16::<LittleEndian>()?;
        skip(&mut cur, 0x6)?;

        let mut play_log_queryable_application_id = [0u64; 16];
        for id in &mut play_log_queryable_application_id {
            *id = cur.read_u64::<LittleEndian>()?;
        }

        let play_log_query_capability = cur.read_u8()?;
        let repair = cur.read_u8()?;
        let program_index = cur.read_u8()?;
        let required_network_service_license_on_launch = cur.read_u8()?;
        skip(&mut cur, 0x4)?;

        // Neighbor-detection client configuration: opaque here.
        skip(&mut cur, 0x198)?;

        let jit_configuration = JitConfiguration {
            flags: cur.read_u64::<LittleEndian>()?,
            memory_size: cur.read_u64::<LittleEndian>()?,
        };

        // Required add-on-contents set descriptors: opaque here.
        skip(&mut cur, 0x40)?;

        let play_report_permission = cur.read_u8()?;
        let crash_screenshot_for_prod = cur.read_u8()?;
        let crash_screenshot_for_dev = cur.read_u8()?;
        skip(&mut cur, 0x5)?;

        let mut accessible_launch_required_version = [0u64; 8];
        for version in &mut accessible_launch_required_version {
            *version = cur.read_u64::<LittleEndian>()?;
        }

        debug_assert_eq!(cur.position(), 0x3448);

        Ok(Nacp {
            titles,
            isbn,
            startup_user_account,
            user_account_switch_lock,
            add_on_content_registration_type,
            attribute,
            supported_language,
            parental_control,
            screenshot,
            video_capture,
            data_loss_confirmation,
            play_log_policy,
            presence_group_id,
            rating_age,
            display_version,
            add_on_content_base_id,
            save_data_owner_id,
            user_account_save_data_size,
            user_account_save_data_journal_size,
            device_save_data_size,
            device_save_data_journal_size,
            bcat_delivery_cache_storage_size,
            application_error_code_category,
            local_communication_id,
            logo_type,
            logo_handling,
            runtime_add_on_content_install,
            runtime_parameter_delivery,
            crash_report,
            hdcp,
            seed_for_pseudo_device_id,
            bcat_passphrase,
            startup_user_account_option,
            user_account_save_data_size_max,
            user_account_save_data_journal_size_max,
            device_save_data_size_max,
            device_save_data_journal_size_max,
            temporary_storage_size,
            cache_storage_size,
            cache_storage_journal_size,
            cache_storage_data_and_journal_size_max,
            cache_storage_index_max,
            play_log_queryable_application_id,
            play_log_query_capability,
            repair,
            program_index,
            required_network_service_license_on_launch,
            jit_configuration,
            play_report_permission,
            crash_screenshot_for_prod,
            crash_screenshot_for_dev,
            accessible_launch_required_version,
        })
    }

    /// Title record for a language; `None` when the record is empty.
    pub fn title(&self, language: Language) -> Option<&Title> {
        self.titles[language.index()].as_ref()
    }

    /// First populated title record, in language order.
    pub fn first_title(&self) -> Option<&Title> {
        self.titles.iter().flatten().next()
    }

    /// Whether the supported-language mask includes `language`.
    pub fn supports_language(&self, language: Language) -> bool {
        self.supported_language & (1 << language.index() as u32) != 0
    }

    /// Whether the attribute flags mark this title as a demo.
    pub fn is_demo(&self) -> bool {
        self.attribute & ATTRIBUTE_DEMO != 0
    }

    /// Whether parental controls permit free communication.
    pub fn allows_free_communication(&self) -> bool {
        self.parental_control & PARENTAL_CONTROL_FREE_COMMUNICATION != 0
    }
}

/// Read a fixed-size NUL-padded string field.
fn read_string(cur: &mut Cursor<&[u8]>, len: usize) -> Result<String> {
    let mut raw = vec![0u8; len];
    cur.read_exact(&mut raw)?;
    let end = raw.iter().position(|&b| b == 0).unwrap_or(len);
    Ok(String::from_utf8_lossy(&raw[..end]).into_owned())
}

fn skip(cur: &mut Cursor<&[u8]>, len: u64) -> Result<()> {
    cur.seek(SeekFrom::Current(len as i64))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{PlayLogPolicy, Screenshot, StartupUserAccount, VideoCapture};
    use pretty_assertions::assert_eq;

    fn put_str(buf: &mut [u8], offset: usize, s: &str) {
        buf[offset..offset + s.len()].copy_from_slice(s.as_bytes());
    }

    fn put_u32(buf: &mut [u8], offset: usize, v: u32) {
        buf[offset..offset + 4].copy_from_slice(&v.to_le_bytes());
    }

    fn put_u64(buf: &mut [u8], offset: usize, v: u64) {
        buf[offset..offset + 8].copy_from_slice(&v.to_le_bytes());
    }

    /// Synthetic descriptor with fields planted at their absolute offsets,
    /// cross-checking the sequential reader against the published layout.
    fn sample() -> Vec<u8> {
        let mut buf = vec![0u8; NACP_SIZE];

        // AmericanEnglish and Japanese title records.
        put_str(&mut buf, 0x0000, "Example Quest");
        put_str(&mut buf, 0x0200, "Example Publisher");
        put_str(&mut buf, 2 * 0x300, "\u{30af}\u{30a8}\u{30b9}\u{30c8}");
        put_str(&mut buf, 2 * 0x300 + 0x200, "Example");

        put_str(&mut buf, 0x3000, "978-0000000000");
        buf[0x3025] = 1; // startup_user_account: Required
        buf[0x3026] = 1; // user_account_switch_lock: Enable
        buf[0x3027] = 1; // add_on_content_registration_type: OnDemand
        put_u32(&mut buf, 0x3028, ATTRIBUTE_DEMO);
        put_u32(&mut buf, 0x302C, 0b101); // AmericanEnglish + Japanese
        put_u32(&mut buf, 0x3030, PARENTAL_CONTROL_FREE_COMMUNICATION);
        buf[0x3034] = 1; // screenshot: Deny
        buf[0x3035] = 2; // video_capture: Enable
        buf[0x3036] = 1; // data_loss_confirmation: Required
        buf[0x3037] = 3; // play_log_policy: Closed
        put_u64(&mut buf, 0x3038, 0x0100_0000_0000_2000);
        buf[0x3040] = 12; // rating_age.cero
        buf[0x3043] = 10; // rating_age.esrb
        put_str(&mut buf, 0x3060, "1.2.3");
        put_u64(&mut buf, 0x3070, 0x0100_0000_0000_2001);
        put_u64(&mut buf, 0x3078, 0x0100_0000_0000_2000);
        put_u64(&mut buf, 0x3080, 0x0100_0000); // user_account_save_data_size
        put_str(&mut buf, 0x30A8, "2170");
        put_u64(&mut buf, 0x30B0, 0x0100_0000_0000_2000); // local_communication_id[0]
        buf[0x30F0] = 2; // logo_type: Nintendo
        buf[0x30F1] = 1; // logo_handling: Manual
        buf[0x30F6] = 1; // crash_report: Allow
        buf[0x30F7] = 1; // hdcp: Required
        put_u64(&mut buf, 0x30F8, 0xDEAD_BEEF_CAFE_F00D);
        buf[0x3188] = 2; // cache_storage_index_max (u16 LE)
        put_u64(&mut buf, 0x3190, 0x0100_0000_0000_2002); // queryable id [0]
        buf[0x3210] = 2; // play_log_query_capability: All
        buf[0x3212] = 1; // program_index
        put_u64(&mut buf, 0x33B0, 1); // jit flags
        put_u64(&mut buf, 0x33B8, 0x40_0000); // jit memory size
        buf[0x3400] = 1; // play_report_permission: TargetMarketing
        buf[0x3402] = 1; // crash_screenshot_for_dev: Allow
        put_u64(&mut buf, 0x3408, 0x0100_0000_0000_2000); // accessible launch [0]

        buf
    }

    #[test]
    fn parses_planted_fields_at_published_offsets() {
        let nacp = Nacp::parse(&sample()).unwrap();

        let en = nacp.title(Language::AmericanEnglish).unwrap();
        assert_eq!(en.name, "Example Quest");
        assert_eq!(en.publisher, "Example Publisher");
        let ja = nacp.title(Language::Japanese).unwrap();
        assert_eq!(ja.name, "\u{30af}\u{30a8}\u{30b9}\u{30c8}");
        assert_eq!(nacp.title(Language::Korean), None);
        assert_eq!(nacp.first_title().unwrap().name, "Example Quest");

        assert_eq!(nacp.isbn, "978-0000000000");
        assert_eq!(
            StartupUserAccount::from_raw(nacp.startup_user_account),
            Some(StartupUserAccount::Required)
        );
        assert!(nacp.is_demo());
        assert!(nacp.supports_language(Language::AmericanEnglish));
        assert!(nacp.supports_language(Language::Japanese));
        assert!(!nacp.supports_language(Language::French));
        assert!(nacp.allows_free_communication());
        assert_eq!(Screenshot::from_raw(nacp.screenshot), Some(Screenshot::Deny));
        assert_eq!(
            VideoCapture::from_raw(nacp.video_capture),
            Some(VideoCapture::Enable)
        );
        assert_eq!(
            PlayLogPolicy::from_raw(nacp.play_log_policy),
            Some(PlayLogPolicy::Closed)
        );
        assert_eq!(nacp.presence_group_id, 0x0100_0000_0000_2000);
        assert_eq!(nacp.rating_age.cero, 12);
        assert_eq!(nacp.rating_age.esrb, 10);
        assert_eq!(nacp.rating_age.usk, 0);
        assert_eq!(nacp.display_version, "1.2.3");
        assert_eq!(nacp.add_on_content_base_id, 0x0100_0000_0000_2001);
        assert_eq!(nacp.user_account_save_data_size, 0x0100_0000);
        assert_eq!(nacp.application_error_code_category, "2170");
        assert_eq!(nacp.local_communication_id[0], 0x0100_0000_0000_2000);
        assert_eq!(nacp.local_communication_id[7], 0);
        assert_eq!(nacp.logo_type, 2);
        assert_eq!(nacp.logo_handling, 1);
        assert_eq!(nacp.crash_report, 1);
        assert_eq!(nacp.hdcp, 1);
        assert_eq!(nacp.seed_for_pseudo_device_id, 0xDEAD_BEEF_CAFE_F00D);
        assert_eq!(nacp.cache_storage_index_max, 2);
        assert_eq!(nacp.play_log_queryable_application_id[0], 0x0100_0000_0000_2002);
        assert_eq!(nacp.play_log_query_capability, 2);
        assert_eq!(nacp.program_index, 1);
        assert_eq!(nacp.jit_configuration.flags, 1);
        assert_eq!(nacp.jit_configuration.memory_size, 0x40_0000);
        assert_eq!(nacp.play_report_permission, 1);
        assert_eq!(nacp.crash_screenshot_for_prod, 0);
        assert_eq!(nacp.crash_screenshot_for_dev, 1);
        assert_eq!(
            nacp.accessible_launch_required_version[0],
            0x0100_0000_0000_2000
        );
    }

    #[test]
    fn rejects_wrong_size_buffers() {
        assert!(matches!(
            Nacp::parse(&[0u8; 0x3FFF]),
            Err(Error::InvalidSize { expected: NACP_SIZE, actual: 0x3FFF })
        ));
        assert!(matches!(
            Nacp::parse(&vec![0u8; NACP_SIZE + 1]),
            Err(Error::InvalidSize { .. })
        ));
    }

    #[test]
    fn empty_descriptor_has_no_titles() {
        let nacp = Nacp::parse(&vec![0u8; NACP_SIZE]).unwrap();
        assert_eq!(nacp.first_title(), None);
        for language in Language::ALL {
            assert_eq!(nacp.title(language), None);
        }
    }
}
