//! Static property image lookup.
//!
//! Listings cycle through five curated image folders per property type, so
//! any loan id maps deterministically onto one of the bundled sets.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Property types with bundled image sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    Apartment,
    House,
    Office,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Office => "office",
        }
    }

    /// Parse a lowercase type name. Unknown names return `None`; callers
    /// treat that as "no configured image set".
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "apartment" => Some(PropertyType::Apartment),
            "house" => Some(PropertyType::House),
            "office" => Some(PropertyType::Office),
            _ => None,
        }
    }
}

static PROPERTY_IMAGE_SETS: Lazy<HashMap<&'static str, [&'static str; 3]>> = Lazy::new(|| {
    HashMap::from([
        (
            "apartment001",
            [
                "/images/apartment001/360_F_647793544_ZAjbiCZxRdPOWLcYRIHW8alUGxLT83p4.jpg",
                "/images/apartment001/christmas-cozy-new-york-apartment-interior-free-photo.webp",
                "/images/apartment001/image.jpg",
            ],
        ),
        (
            "apartment002",
            [
                "/images/apartment002/images.jpeg",
                "/images/apartment002/images (1).jpeg",
                "/images/apartment002/images (2).jpeg",
            ],
        ),
        (
            "apartment003",
            [
                "/images/apartment003/images.jpeg",
                "/images/apartment003/Renovated-Madrid-Apartment-01-1-Kindesign.jpg",
                "/images/apartment003/small-apartment-interior-design-200217-934-01-800x420.jpg",
            ],
        ),
        (
            "apartment004",
            [
                "/images/apartment004/cdn.cliqueinc.com__cache__posts__222482__paris-home-222482-1493163851063-image.700x0c-5337a287ec2547f6bbd96ece18109fae.jpg",
                "/images/apartment004/images (1).jpeg",
                "/images/apartment004/images.jpeg",
            ],
        ),
        (
            "apartment005",
            [
                "/images/apartment005/07_LivingRoom_ApartmentInMachiya_YumikoMikiArchitects_Kenichi_Suzuki.jpg",
                "/images/apartment005/images (2).jpeg",
                "/images/apartment005/tokyo-renovation-i-in-studio-interior_dezeen_2364_col_9-852x568.webp",
            ],
        ),
        (
            "house001",
            [
                "/images/house001/ContentImage3.jpg",
                "/images/house001/images.jpeg",
                "/images/house001/Melt-House-Osaka-Japan-by-SAI-Studio-Yellowtrace-04.jpg",
            ],
        ),
        (
            "house002",
            [
                "/images/house002/294225623.jpg",
                "/images/house002/Agnes-Rudzite-Interiors-1930s-Villa-In-Jurmala-Latvia-Heritage-Interior-Photo-Mikhail-Loskutoff-Yellowtrace.jpg",
                "/images/house002/eklektichnyi-dizayn-v-jurmale-pufikhomes-1-1.jpg",
            ],
        ),
        (
            "house003",
            [
                "/images/house003/images.jpeg",
                "/images/house003/large_BN-SU049_0408HO_GR_20170403184509.jpg",
                "/images/house003/russian-country-home-decorating-style-22.jpg",
            ],
        ),
        (
            "house004",
            [
                "/images/house004/chinese-interior-design-elements-living-room.jpg",
                "/images/house004/images.jpeg",
                "/images/house004/modern-chinese-interior-with-traditional-decor.jpg",
            ],
        ),
        (
            "house005",
            [
                "/images/house005/images (1).jpeg",
                "/images/house005/images.jpeg",
                "/images/house005/Melissa-and-Miller-Interiors-and-the-Luxurious-London-House-1.jpg",
            ],
        ),
        (
            "office001",
            [
                "/images/office001/images (1).jpeg",
                "/images/office001/images.jpeg",
                "/images/office001/Meadows_Conference_Room_1-700x467.jpg",
            ],
        ),
        (
            "office002",
            [
                "/images/office002/images (1).jpeg",
                "/images/office002/images (2).jpeg",
                "/images/office002/images.jpeg",
            ],
        ),
        (
            "office003",
            [
                "/images/office003/images.jpeg",
                "/images/office003/TwitterHERO.webp",
                "/images/office003/公寓室内-sentosa-cove-akihaus-design-studio-img~1b618fa606ef7cd9_14-4484-1-7218e0c.jpg",
            ],
        ),
        (
            "office004",
            [
                "/images/office004/9a6dbf28366873.55fecbb1be676.jpg",
                "/images/office004/images (1).jpeg",
                "/images/office004/sddefault.jpg",
            ],
        ),
        (
            "office005",
            [
                "/images/office005/1720614841232.png",
                "/images/office005/image_blog11_1416x.webp",
                "/images/office005/images.jpeg",
            ],
        ),
    ])
});

/// Folder number for a listing id. Ids beyond 5 cycle back through the
/// available folders, so id and id+5 share a set.
fn folder_number(id: i64) -> String {
    let folder = ((id - 1) % 5) + 1;
    format!("{folder:03}")
}

/// Image paths for a property, selected by type and listing id. Unknown
/// combinations yield an empty slice.
pub fn property_images_by_id(property_type: PropertyType, id: i64) -> &'static [&'static str] {
    let key = format!("{}{}", property_type.as_str(), folder_number(id));
    PROPERTY_IMAGE_SETS
        .get(key.as_str())
        .map(|set| &set[..])
        .unwrap_or(&[])
}

/// Thumbnail (first image) for a property, or `""` when no set exists.
pub fn property_thumbnail_by_id(property_type: PropertyType, id: i64) -> &'static str {
    property_images_by_id(property_type, id)
        .first()
        .copied()
        .unwrap_or("")
}

/// Default image set for a type, used where no listing id is in play.
pub fn property_images(property_type: PropertyType) -> &'static [&'static str] {
    property_images_by_id(property_type, 1)
}

/// Default thumbnail for a type.
pub fn property_thumbnail(property_type: PropertyType) -> &'static str {
    property_thumbnail_by_id(property_type, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_cycle_through_five_folders() {
        for id in 1..=10 {
            assert_eq!(
                property_images_by_id(PropertyType::Apartment, id),
                property_images_by_id(PropertyType::Apartment, id + 5),
                "id {id} and {} should share a folder",
                id + 5
            );
        }
        assert_eq!(
            property_images_by_id(PropertyType::Apartment, 6),
            property_images_by_id(PropertyType::Apartment, 1)
        );
    }

    #[test]
    fn every_type_has_five_sets_of_three() {
        for kind in [PropertyType::Apartment, PropertyType::House, PropertyType::Office] {
            for id in 1..=5 {
                assert_eq!(property_images_by_id(kind, id).len(), 3);
            }
        }
    }

    #[test]
    fn unknown_lookup_is_empty_not_an_error() {
        // Id 0 lands outside the configured folder range.
        assert!(property_images_by_id(PropertyType::House, 0).is_empty());
        assert_eq!(property_thumbnail_by_id(PropertyType::House, 0), "");
        assert!(PropertyType::parse("castle").is_none());
    }

    #[test]
    fn thumbnail_is_first_image() {
        let images = property_images_by_id(PropertyType::Office, 2);
        assert_eq!(property_thumbnail_by_id(PropertyType::Office, 2), images[0]);
    }

    #[test]
    fn typed_defaults_use_the_first_folder() {
        assert_eq!(
            property_images(PropertyType::House),
            property_images_by_id(PropertyType::House, 1)
        );
        assert_eq!(
            property_thumbnail(PropertyType::House),
            property_thumbnail_by_id(PropertyType::House, 1)
        );
    }
}
