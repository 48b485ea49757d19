//! Per-row reconciliation of Tycho-2 rows into canonical star records.
//!
//! Each row goes through the same steps:
//!
//! 1. blank RA or Dec → [`Reconciled::NoPosition`]
//! 2. provisional Johnson V and B-V from BT/VT
//! 3. HIP number and component split off the HIP/CCDM field
//! 4. reference lookup, by HIP when present, otherwise by TYC
//! 5. epoch normalization to J2000.0
//! 6. extended cross-identifications, by HIP only
//!
//! Reference values win for magnitude, parallax and proper motion; the row's
//! own proper motion is the fallback, then zero.

use crate::constellation::ConstellationMap;
use crate::epoch::{EpochTransformer, Observation, SourceEpoch};
use crate::ids::{normalize_primary_id, normalize_secondary_id, HipId};
use crate::names::{CommonNames, CrossIndex};
use crate::photometry::photometric_transform;
use crate::record::{CanonicalStarRecord, StarExtras};
use crate::reference::{ReferenceKey, ReferenceTable};
use crate::tycho2::{Tycho2MainRow, Tycho2SupplementRow};
use crate::{CatalogError, CatalogResult};
use bigsky_coords::Astrometry;

#[derive(Debug, Clone, PartialEq)]
pub enum Reconciled {
    Record(CanonicalStarRecord),
    NoPosition,
}

/// Read-only lookup tables shared by every row of a run.
#[derive(Debug, Default)]
pub struct ReferenceData {
    pub astrometry: ReferenceTable,
    pub names: CommonNames,
    pub cross_index: CrossIndex,
    pub constellations: Option<ConstellationMap>,
    /// Attach [`StarExtras`] to every record.
    pub extended: bool,
}

/// Fields common to both Tycho-2 layouts once the epoch is known.
struct CatalogRow<'a> {
    tyc: &'a str,
    hip: Option<&'a str>,
    ra: f64,
    dec: f64,
    pm_ra: Option<f64>,
    pm_dec: Option<f64>,
    bt: Option<f64>,
    vt: Option<f64>,
    epoch: SourceEpoch,
}

pub fn reconcile_tycho2_main<A: Astrometry>(
    row: &Tycho2MainRow,
    refs: &ReferenceData,
    transformer: &EpochTransformer<A>,
) -> CatalogResult<Reconciled> {
    let (Some(ra), Some(dec)) = (row.ra, row.dec) else {
        return Ok(Reconciled::NoPosition);
    };
    let epoch = match (row.epoch_ra_offset, row.epoch_dec_offset) {
        (Some(ra), Some(dec)) => SourceEpoch::Offsets { ra, dec },
        (None, _) => return Err(CatalogError::invalid_field("epRA-1990", "")),
        (_, None) => return Err(CatalogError::invalid_field("epDE-1990", "")),
    };

    reconcile(
        CatalogRow {
            tyc: &row.tyc,
            hip: row.hip.as_deref(),
            ra,
            dec,
            pm_ra: row.pm_ra,
            pm_dec: row.pm_dec,
            bt: row.bt,
            vt: row.vt,
            epoch,
        },
        refs,
        transformer,
    )
}

pub fn reconcile_supplement<A: Astrometry>(
    row: &Tycho2SupplementRow,
    refs: &ReferenceData,
    transformer: &EpochTransformer<A>,
) -> CatalogResult<Reconciled> {
    let (Some(ra), Some(dec)) = (row.ra, row.dec) else {
        return Ok(Reconciled::NoPosition);
    };

    reconcile(
        CatalogRow {
            tyc: &row.tyc,
            hip: row.hip.as_deref(),
            ra,
            dec,
            pm_ra: row.pm_ra,
            pm_dec: row.pm_dec,
            bt: row.bt,
            vt: row.vt,
            epoch: SourceEpoch::Hipparcos,
        },
        refs,
        transformer,
    )
}

fn reconcile<A: Astrometry>(
    row: CatalogRow<'_>,
    refs: &ReferenceData,
    transformer: &EpochTransformer<A>,
) -> CatalogResult<Reconciled> {
    let (bv, provisional_magnitude) = photometric_transform(row.bt, row.vt);

    let tyc_id = normalize_primary_id(row.tyc)?;
    let hip = row.hip.map(normalize_secondary_id).transpose()?;

    let key = match &hip {
        Some(hip) => ReferenceKey::Hip(hip.number),
        None => ReferenceKey::Tyc(tyc_id.clone()),
    };
    let reference = refs.astrometry.get(&key).cloned().unwrap_or_default();

    let magnitude = reference
        .magnitude
        .or(provisional_magnitude)
        .ok_or_else(|| CatalogError::MissingMagnitude {
            tyc_id: tyc_id.clone(),
        })?;
    let parallax = reference.parallax.unwrap_or(0.0);
    let pm_ra = reference.pm_ra.or(row.pm_ra).unwrap_or(0.0);
    let pm_dec = reference.pm_dec.or(row.pm_dec).unwrap_or(0.0);

    let (ra_deg, dec_deg) = transformer.to_standard_epoch(&Observation {
        ra_deg: row.ra,
        dec_deg: row.dec,
        pm_ra,
        pm_dec,
        parallax,
        epoch: row.epoch,
    })?;

    let extras = refs
        .extended
        .then(|| star_extras(hip.as_ref(), ra_deg, dec_deg, refs));

    let (hip_id, ccdm) = match hip {
        Some(HipId { number, component }) => (Some(number), Some(component)),
        None => (None, None),
    };

    Ok(Reconciled::Record(CanonicalStarRecord {
        tyc_id,
        hip_id,
        ccdm,
        magnitude,
        bv,
        ra_deg,
        dec_deg,
        pm_ra,
        pm_dec,
        parallax,
        extras,
    }))
}

fn star_extras(hip: Option<&HipId>, ra_deg: f64, dec_deg: f64, refs: &ReferenceData) -> StarExtras {
    let mut extras = StarExtras::default();

    let cross = hip.and_then(|h| refs.cross_index.get(h.number));
    if let Some(hip) = hip {
        extras.name = refs.names.get(hip.number).map(str::to_string);
    }
    if let Some(entry) = cross {
        extras.hd_id = entry.hd;
        extras.bayer = entry.bayer.clone();
        extras.flamsteed = entry.flamsteed;
    }

    extras.constellation = match &refs.constellations {
        Some(map) => map.lookup(ra_deg, dec_deg).map(str::to_string),
        None => cross.and_then(|entry| entry.constellation.clone()),
    };
    extras
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::AstrometryOverride;
    use std::io::Cursor;

    const MAIN_ROW: &str = "0001 00008 1| |  2.31750494|  2.23184345|  -16.3|   -9.0| 68| 73| 1.7| 1.8|1958.89|1951.94| 4|1.0|1.0|0.9|1.0|12.146|0.158|12.146|0.223|999| |         |  2.31754222|  2.23186444|1.67|1.54| 88.0|100.8| |-0.2";
    const BRIGHT_ROW: &str = "0001 00013 1| |  1.12558209|  2.26739400|   27.7|   -0.5| 9| 12| 1.2| 1.2|1990.76|1989.25| 8|1.0|1.0|1.0|1.0|10.488|0.038| 8.670|0.015|999| |         |  1.12551889|  2.26739556|1.81|1.52|  9.3| 12.7| |-0.2";
    const SUPPLEMENT_HIP_ROW: &str = "0022 00341 2|H| 17.30306378|  2.55263389|   -7.8|  -28.5| 13.3| 10.1|  1.5|  1.2|H|      |     |11.851|0.084|  3|T|  5413B";
    const SUPPLEMENT_NO_POSITION: &str = "0014 00001 2|T|            |            |       |       | 60.0| 60.0|     |     | |12.500|0.300|12.100|0.250|999| |      ";

    fn record(result: Reconciled) -> CanonicalStarRecord {
        match result {
            Reconciled::Record(record) => record,
            Reconciled::NoPosition => panic!("expected a record"),
        }
    }

    #[test]
    fn test_main_row_without_reference() {
        let row = Tycho2MainRow::parse(MAIN_ROW).unwrap();
        let refs = ReferenceData::default();
        let r = record(reconcile_tycho2_main(&row, &refs, &EpochTransformer::new()).unwrap()).rounded();

        assert_eq!(r.tyc_id, "1-8-1");
        assert_eq!(r.hip_id, None);
        assert_eq!(r.ccdm, None);
        assert_eq!(r.magnitude, 12.15);
        assert_eq!(r.bv, Some(0.0));
        assert_eq!(r.ra_deg, 2.3175);
        assert_eq!(r.dec_deg, 2.2319);
        assert_eq!(r.pm_ra, -16.3);
        assert_eq!(r.pm_dec, -9.0);
        assert_eq!(r.parallax, 0.0);
        assert!(r.extras.is_none());
    }

    #[test]
    fn test_main_row_lands_near_mean_position() {
        let row = Tycho2MainRow::parse(BRIGHT_ROW).unwrap();
        let r = record(reconcile_tycho2_main(&row, &ReferenceData::default(), &EpochTransformer::new()).unwrap());
        // the catalogue's own J2000 mean position
        assert!((r.ra_deg - 1.12558209).abs() < 1e-4, "ra = {}", r.ra_deg);
        assert!((r.dec_deg - 2.26739400).abs() < 1e-4, "dec = {}", r.dec_deg);

        let rounded = r.rounded();
        assert_eq!(rounded.magnitude, 8.51);
        assert_eq!(rounded.bv, Some(1.55));
    }

    #[test]
    fn test_reference_by_tyc_overrides_magnitude_and_parallax() {
        let row = Tycho2MainRow::parse(BRIGHT_ROW).unwrap();
        let mut refs = ReferenceData::default();
        refs.astrometry.register(
            ReferenceKey::Tyc("1-13-1".into()),
            &AstrometryOverride {
                magnitude: Some(8.55),
                parallax: Some(7.0),
                ..Default::default()
            },
        );
        let r = record(reconcile_tycho2_main(&row, &refs, &EpochTransformer::new()).unwrap());
        assert_eq!(r.magnitude, 8.55);
        assert_eq!(r.parallax, 7.0);
        assert_eq!(r.pm_ra, 27.7);
        assert_eq!(r.pm_dec, -0.5);
    }

    #[test]
    fn test_supplement_with_hip_reference() {
        let row = Tycho2SupplementRow::parse(SUPPLEMENT_HIP_ROW).unwrap();
        let mut refs = ReferenceData::default();
        refs.astrometry
            .load_hipparcos(Cursor::new(
                "H|        5413| |01 09 12.71|+02 33 09.5| 9.27| |G|017.30296036|+02.55265086| |   1.77|   -6.86|  -28.91|  1.54",
            ))
            .unwrap();

        let r = record(reconcile_supplement(&row, &refs, &EpochTransformer::new()).unwrap());
        assert_eq!(r.tyc_id, "22-341-2");
        assert_eq!(r.hip_id, Some(5413));
        assert_eq!(r.ccdm.as_deref(), Some("B"));
        assert_eq!(r.magnitude, 9.27);
        assert_eq!(r.bv, None);
        assert_eq!(r.parallax, 1.77);
        assert_eq!(r.pm_ra, -6.86);
        assert_eq!(r.pm_dec, -28.91);
        assert!((r.ra_deg - 17.3031).abs() < 1e-4);
        assert!((r.dec_deg - 2.5526).abs() < 1e-4);
    }

    #[test]
    fn test_reference_ignored_when_keyed_elsewhere() {
        // HIP rows never consult the TYC key space
        let row = Tycho2SupplementRow::parse(SUPPLEMENT_HIP_ROW).unwrap();
        let mut refs = ReferenceData::default();
        refs.astrometry.register(
            ReferenceKey::Tyc("22-341-2".into()),
            &AstrometryOverride {
                parallax: Some(50.0),
                ..Default::default()
            },
        );
        let r = record(reconcile_supplement(&row, &refs, &EpochTransformer::new()).unwrap());
        assert_eq!(r.parallax, 0.0);
        assert_eq!(r.magnitude, 11.851);
    }

    #[test]
    fn test_blank_position_is_no_position() {
        let row = Tycho2SupplementRow::parse(SUPPLEMENT_NO_POSITION).unwrap();
        let result = reconcile_supplement(&row, &ReferenceData::default(), &EpochTransformer::new()).unwrap();
        assert_eq!(result, Reconciled::NoPosition);
    }

    #[test]
    fn test_missing_magnitude_is_an_error() {
        let mut row = Tycho2MainRow::parse(MAIN_ROW).unwrap();
        row.bt = None;
        row.vt = None;
        let err = reconcile_tycho2_main(&row, &ReferenceData::default(), &EpochTransformer::new()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingMagnitude { .. }));
    }

    #[test]
    fn test_missing_epoch_is_an_error() {
        let mut row = Tycho2MainRow::parse(MAIN_ROW).unwrap();
        row.epoch_dec_offset = None;
        assert!(reconcile_tycho2_main(&row, &ReferenceData::default(), &EpochTransformer::new()).is_err());
    }

    #[test]
    fn test_extended_attributes() {
        let row = Tycho2SupplementRow::parse(SUPPLEMENT_HIP_ROW).unwrap();
        let refs = ReferenceData {
            names: CommonNames::from_reader(Cursor::new("hip,name\n5413,Test Star\n")).unwrap(),
            constellations: Some(
                ConstellationMap::from_reader(Cursor::new(
                    " 1.0000  3.0000 -10.0000 CET\n 0.0000 24.0000 -90.0000 PSC\n",
                ))
                .unwrap(),
            ),
            extended: true,
            ..Default::default()
        };
        let r = record(reconcile_supplement(&row, &refs, &EpochTransformer::new()).unwrap());
        let extras = r.extras.unwrap();
        assert_eq!(extras.name.as_deref(), Some("Test Star"));
        assert_eq!(extras.hd_id, None);
        assert_eq!(extras.constellation.as_deref(), Some("cet"));
    }

    #[test]
    fn test_bad_hip_is_identifier_error() {
        let mut row = Tycho2SupplementRow::parse(SUPPLEMENT_HIP_ROW).unwrap();
        row.hip = Some("B5413".into());
        let err = reconcile_supplement(&row, &ReferenceData::default(), &EpochTransformer::new()).unwrap_err();
        assert!(matches!(err, CatalogError::IdentifierFormat { .. }));
    }
}
