//! # Names mapping and load options
//!
//! A [`NamesMapping`] tells the loader which source variable plays which grid
//! [`Role`]. The three required roles are plain fields, the optional ones are
//! `Option`s so that presence is decided once, when the mapping is built, rather
//! than probed while loading.
//!
//! Files written by the same producer usually share their names, so mappings
//! are meant to be written once and reused:
//!
//! ```
//! use ugrid::NamesMapping;
//!
//! let fvcom = NamesMapping::new("lon", "lat", "nv")
//!     .with_face_face_connectivity("nbe")
//!     .with_face_coordinates("lonc", "latc")
//!     .with_boundaries("bnd");
//!
//! assert_eq!(fvcom.face_coordinates.as_ref().map(|c| c.lat.as_str()), Some("latc"));
//! ```

use crate::Error;
use derive_more::Display;

/// The logical part of a grid a source variable can be mapped to.
///
/// The display form is the key used by the string keyed form of a mapping,
/// see [`NamesMapping::from_pairs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Role {
    #[display(fmt = "nodes_lon")]
    NodesLon,
    #[display(fmt = "nodes_lat")]
    NodesLat,
    #[display(fmt = "faces")]
    Faces,
    #[display(fmt = "face_face_connectivity")]
    FaceFaceConnectivity,
    #[display(fmt = "face_coordinates_lon")]
    FaceCoordinatesLon,
    #[display(fmt = "face_coordinates_lat")]
    FaceCoordinatesLat,
    #[display(fmt = "boundaries")]
    Boundaries,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::NodesLon,
        Role::NodesLat,
        Role::Faces,
        Role::FaceFaceConnectivity,
        Role::FaceCoordinatesLon,
        Role::FaceCoordinatesLat,
        Role::Boundaries,
    ];

    /// parse a mapping key such as `"nodes_lon"`
    pub fn from_key(key: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.to_string() == key)
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Role::NodesLon | Role::NodesLat | Role::Faces)
    }
}

/// Source variable names of the face center coordinates. Both are needed, so
/// they are only ever present together.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaceCoordinateNames {
    pub lon: String,
    pub lat: String,
}

/// Maps grid roles to variable names of a source dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamesMapping {
    pub nodes_lon: String,
    pub nodes_lat: String,
    pub faces: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub face_face_connectivity: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub face_coordinates: Option<FaceCoordinateNames>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub boundaries: Option<String>,
}

impl NamesMapping {
    /// create a mapping with only the required components
    pub fn new<A, B, C>(nodes_lon: A, nodes_lat: B, faces: C) -> Self
    where
        A: Into<String>,
        B: Into<String>,
        C: Into<String>,
    {
        Self {
            nodes_lon: nodes_lon.into(),
            nodes_lat: nodes_lat.into(),
            faces: faces.into(),
            face_face_connectivity: None,
            face_coordinates: None,
            boundaries: None,
        }
    }

    pub fn with_face_face_connectivity<T: Into<String>>(mut self, name: T) -> Self {
        self.face_face_connectivity = Some(name.into());
        self
    }

    pub fn with_face_coordinates<A: Into<String>, B: Into<String>>(mut self, lon: A, lat: B) -> Self {
        self.face_coordinates = Some(FaceCoordinateNames {
            lon: lon.into(),
            lat: lat.into(),
        });
        self
    }

    pub fn with_boundaries<T: Into<String>>(mut self, name: T) -> Self {
        self.boundaries = Some(name.into());
        self
    }

    /// Build a mapping from `(key, variable name)` pairs, the way loaders
    /// configured with a plain dictionary describe it:
    ///
    /// ```
    /// use ugrid::NamesMapping;
    ///
    /// let names = NamesMapping::from_pairs([
    ///     ("nodes_lon", "lon"),
    ///     ("nodes_lat", "lat"),
    ///     ("faces", "nv"),
    ///     ("face_coordinates_lon", "lonc"),
    /// ])
    /// .unwrap();
    ///
    /// // a lone half of the face coordinates does not count
    /// assert!(names.face_coordinates.is_none());
    /// ```
    ///
    /// Keys that do not name a [`Role`] are skipped with a warning. A missing
    /// required key is reported as [`Error::MissingKey`].
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut nodes_lon = None;
        let mut nodes_lat = None;
        let mut faces = None;
        let mut face_face_connectivity = None;
        let mut face_lon = None;
        let mut face_lat = None;
        let mut boundaries = None;

        for (key, value) in pairs {
            let key = key.as_ref();
            let slot = match Role::from_key(key) {
                Some(Role::NodesLon) => &mut nodes_lon,
                Some(Role::NodesLat) => &mut nodes_lat,
                Some(Role::Faces) => &mut faces,
                Some(Role::FaceFaceConnectivity) => &mut face_face_connectivity,
                Some(Role::FaceCoordinatesLon) => &mut face_lon,
                Some(Role::FaceCoordinatesLat) => &mut face_lat,
                Some(Role::Boundaries) => &mut boundaries,
                None => {
                    log::warn!("ignoring unrecognized names mapping key `{}`", key);
                    continue;
                }
            };
            *slot = Some(value.into());
        }

        let face_coordinates = match (face_lon, face_lat) {
            (Some(lon), Some(lat)) => Some(FaceCoordinateNames { lon, lat }),
            (None, None) => None,
            (lon, _) => {
                let (present, absent) = if lon.is_some() {
                    (Role::FaceCoordinatesLon, Role::FaceCoordinatesLat)
                } else {
                    (Role::FaceCoordinatesLat, Role::FaceCoordinatesLon)
                };
                log::warn!(
                    "`{}` is mapped without `{}`, face coordinates will not be loaded",
                    present,
                    absent
                );
                None
            }
        };

        Ok(Self {
            nodes_lon: nodes_lon.ok_or(Error::MissingKey(Role::NodesLon))?,
            nodes_lat: nodes_lat.ok_or(Error::MissingKey(Role::NodesLat))?,
            faces: faces.ok_or(Error::MissingKey(Role::Faces))?,
            face_face_connectivity,
            face_coordinates,
            boundaries,
        })
    }

    /// the source variable mapped to `role`, if any
    pub fn variable(&self, role: Role) -> Option<&str> {
        match role {
            Role::NodesLon => Some(&self.nodes_lon),
            Role::NodesLat => Some(&self.nodes_lat),
            Role::Faces => Some(&self.faces),
            Role::FaceFaceConnectivity => self.face_face_connectivity.as_deref(),
            Role::FaceCoordinatesLon => self.face_coordinates.as_ref().map(|c| c.lon.as_str()),
            Role::FaceCoordinatesLat => self.face_coordinates.as_ref().map(|c| c.lat.as_str()),
            Role::Boundaries => self.boundaries.as_deref(),
        }
    }
}

/// Global attributes a source must carry before any of its data is trusted.
///
/// Values are compared case-insensitively: both the attribute found and the
/// expected value are lowercased, so `("grid_type", "Triangular")` accepts a
/// source whose `grid_type` is `triangular`. An empty check (the default)
/// accepts every source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AttributeCheck(Vec<(String, String)>);

impl AttributeCheck {
    pub fn new() -> Self {
        Self::default()
    }

    /// require the global attribute `name` to equal `expected`
    pub fn with<A: Into<String>, B: Into<String>>(mut self, name: A, expected: B) -> Self {
        self.push(name, expected);
        self
    }

    pub fn push<A: Into<String>, B: Into<String>>(&mut self, name: A, expected: B) {
        self.0.push((name.into(), expected.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<A, B> FromIterator<(A, B)> for AttributeCheck
where
    A: Into<String>,
    B: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (A, B)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(a, b)| (a.into(), b.into())).collect())
    }
}

/// How the two axes of a connectivity array are laid out in the source.
///
/// `Detect` guesses from the shape: an array whose first axis is not longer than
/// its second is taken to be stored `(arity, count)` and is transposed. The guess
/// is wrong for grids with no more faces than vertices per face (three or fewer
/// triangles), which is what the explicit variants are for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisOrder {
    #[default]
    Detect,
    /// stored `(count, arity)`, one row per element
    CountFirst,
    /// stored `(arity, count)`, one column per element
    ArityFirst,
}

/// Everything besides the names mapping that changes how a source is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub attribute_check: AttributeCheck,
    pub axis_order: AxisOrder,
}

impl LoadOptions {
    pub fn with_attribute_check(mut self, attribute_check: AttributeCheck) -> Self {
        self.attribute_check = attribute_check;
        self
    }

    /// add a single `(name, expected)` pair to the attribute check
    pub fn with_check<A: Into<String>, B: Into<String>>(mut self, name: A, expected: B) -> Self {
        self.attribute_check.push(name, expected);
        self
    }

    pub fn with_axis_order(mut self, axis_order: AxisOrder) -> Self {
        self.axis_order = axis_order;
        self
    }
}

impl From<AttributeCheck> for LoadOptions {
    fn from(attribute_check: AttributeCheck) -> Self {
        Self::default().with_attribute_check(attribute_check)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_roles() {
        let required: Vec<Role> = Role::ALL.iter().copied().filter(Role::is_required).collect();
        assert_eq!(required, vec![Role::NodesLon, Role::NodesLat, Role::Faces]);
    }

    #[test]
    fn role_keys_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::from_key(&role.to_string()), Some(role));
        }
        assert_eq!(Role::from_key("attribute_check"), None);
    }

    #[test]
    fn pairs_with_every_key() {
        let names = NamesMapping::from_pairs([
            ("nodes_lon", "lon"),
            ("nodes_lat", "lat"),
            ("faces", "nv"),
            ("face_face_connectivity", "nbe"),
            ("face_coordinates_lon", "lonc"),
            ("face_coordinates_lat", "latc"),
            ("boundaries", "bnd"),
        ])
        .unwrap();

        let expected = NamesMapping::new("lon", "lat", "nv")
            .with_face_face_connectivity("nbe")
            .with_face_coordinates("lonc", "latc")
            .with_boundaries("bnd");

        assert_eq!(names, expected);
        assert_eq!(names.variable(Role::FaceCoordinatesLat), Some("latc"));
    }

    #[test]
    fn pairs_missing_required_key() {
        let err = NamesMapping::from_pairs([("nodes_lon", "lon"), ("faces", "nv")]).unwrap_err();
        assert!(matches!(err, Error::MissingKey(Role::NodesLat)));
    }

    #[test]
    fn pairs_ignore_unknown_keys() {
        let names = NamesMapping::from_pairs([
            ("attribute_check", "grid_type"),
            ("nodes_lon", "lon"),
            ("nodes_lat", "lat"),
            ("faces", "nv"),
            ("face_coordinates_lat", "latc"),
        ])
        .unwrap();

        assert_eq!(names, NamesMapping::new("lon", "lat", "nv"));
        assert_eq!(names.variable(Role::FaceCoordinatesLat), None);
    }

    #[test]
    fn options_builder() {
        let options = LoadOptions::default()
            .with_check("grid_type", "triangular")
            .with_axis_order(AxisOrder::ArityFirst);

        assert_eq!(
            options.attribute_check.iter().collect::<Vec<_>>(),
            vec![("grid_type", "triangular")]
        );
        assert_eq!(options.axis_order, AxisOrder::ArityFirst);
        assert!(LoadOptions::default().attribute_check.is_empty());
    }
}
