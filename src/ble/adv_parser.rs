use heapless::String;

/// 16-bit UUID of the Current Time Service.
pub const CURRENT_TIME_SERVICE_UUID: u16 = 0x1805;

const AD_INCOMPLETE_16BIT_UUIDS: u8 = 0x02;
const AD_COMPLETE_16BIT_UUIDS: u8 = 0x03;
const AD_SHORTENED_NAME: u8 = 0x08;
const AD_COMPLETE_NAME: u8 = 0x09;

/// `(ad_type, payload)` of each `[len, type, payload..]` structure.
/// Stops at a zero length or at a structure running past the buffer.
fn ad_structures<'a>(data: &'a [u8]) -> impl Iterator<Item = (u8, &'a [u8])> {
    let mut rest = data;
    core::iter::from_fn(move || {
        let (&len, tail) = rest.split_first()?;
        let len = usize::from(len);
        if len == 0 || len > tail.len() {
            return None;
        }
        let (structure, next) = tail.split_at(len);
        rest = next;
        Some((structure[0], &structure[1..]))
    })
}

/// Check if raw advertisement data lists the 16-bit service `uuid`.
pub fn contains_service_uuid(data: &[u8], uuid: u16) -> bool {
    let uuid_le = uuid.to_le_bytes();
    ad_structures(data)
        .filter(|&(ad_type, _)| {
            matches!(ad_type, AD_INCOMPLETE_16BIT_UUIDS | AD_COMPLETE_16BIT_UUIDS)
        })
        .any(|(_, uuids)| uuids.chunks_exact(2).any(|chunk| chunk == uuid_le))
}

pub fn advertises_current_time(data: &[u8]) -> bool {
    contains_service_uuid(data, CURRENT_TIME_SERVICE_UUID)
}

/// Local name of the advertiser, shortened or complete, cut at 32 bytes.
pub fn extract_device_name(data: &[u8]) -> String<32> {
    let mut name = String::new();
    let found = ad_structures(data)
        .find(|&(ad_type, _)| matches!(ad_type, AD_SHORTENED_NAME | AD_COMPLETE_NAME));

    match found {
        Some((_, bytes)) => {
            for &b in bytes {
                if name.push(char::from(b)).is_err() {
                    break;
                }
            }
        }
        None => {
            let _ = name.push_str("Unknown");
        }
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_cts_uuid_in_advertisement() {
        // len=3, type=0x03 (Complete 16-bit UUIDs), UUID=0x1805
        let ad_data = [0x03, 0x03, 0x05, 0x18];
        assert!(advertises_current_time(&ad_data));
    }

    #[test]
    fn other_service_is_not_a_time_server() {
        // Battery Service (0x180F)
        let ad_data = [0x03, 0x03, 0x0F, 0x18];
        assert!(!advertises_current_time(&ad_data));
        assert!(contains_service_uuid(&ad_data, 0x180F));
    }

    #[test]
    fn cts_uuid_among_multiple_uuids() {
        let ad_data = [
            0x02, 0x01, 0x06, // Flags
            0x07, 0x03, // len=7, type=0x03
            0x0F, 0x18, // Battery
            0x05, 0x18, // Current Time
            0x01, 0x18, // GATT
        ];
        assert!(advertises_current_time(&ad_data));
    }

    #[test]
    fn incomplete_uuid_list() {
        let ad_data = [0x03, 0x02, 0x05, 0x18];
        assert!(advertises_current_time(&ad_data));
    }

    #[test]
    fn uuid_bytes_inside_name_are_ignored() {
        // Complete Local Name whose bytes happen to be 05 18
        let ad_data = [0x03, 0x09, 0x05, 0x18];
        assert!(!advertises_current_time(&ad_data));
    }

    #[test]
    fn empty_and_malformed_advertisement_data() {
        assert!(!advertises_current_time(&[]));
        assert!(!advertises_current_time(&[0x00]));
        // length runs past the end of the buffer
        assert!(!advertises_current_time(&[0x05, 0x03, 0x05, 0x18]));
    }

    #[test]
    fn extract_complete_local_name() {
        let ad_data = [
            0x07, 0x09, // len=7, type=0x09
            b'P', b'h', b'o', b'n', b'e', b'!',
        ];
        assert_eq!(extract_device_name(&ad_data).as_str(), "Phone!");
    }

    #[test]
    fn extract_shortened_local_name() {
        let ad_data = [0x04, 0x08, b'C', b'T', b'S'];
        assert_eq!(extract_device_name(&ad_data).as_str(), "CTS");
    }

    #[test]
    fn name_after_uuid_list() {
        let ad_data = [0x03, 0x03, 0x05, 0x18, 0x04, 0x09, b'H', b'u', b'b'];
        assert_eq!(extract_device_name(&ad_data).as_str(), "Hub");
        assert!(advertises_current_time(&ad_data));
    }

    #[test]
    fn no_name_in_advertisement() {
        let ad_data = [0x02, 0x01, 0x06];
        assert_eq!(extract_device_name(&ad_data).as_str(), "Unknown");
    }

    #[test]
    fn name_truncated_to_32_chars() {
        let mut ad_data = [b'X'; 40];
        ad_data[0] = 35;
        ad_data[1] = 0x09;
        assert_eq!(extract_device_name(&ad_data).len(), 32);
    }
}
