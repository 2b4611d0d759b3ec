//! Fixture tests for the per-locus algebra: construction, compatibility,
//! complement, distance counts, and imputation-style fills.

use haplokit::{Genotype, Haplotype, HaplokitError};

fn hap(codes: &[u8]) -> Haplotype {
    Haplotype::from_codes(codes).expect("valid haplotype codes")
}

fn geno(codes: &[u8]) -> Genotype {
    Genotype::from_codes(codes).expect("valid genotype codes")
}

#[test]
fn construction_round_trips_every_locus() {
    let hap_codes = [1u8, 0, 9, 1, 0];
    let h = hap(&hap_codes);
    for (i, &code) in hap_codes.iter().enumerate() {
        assert_eq!(h.get(i).unwrap().code(), code);
    }

    let geno_codes = [2u8, 1, 0, 9, 2];
    let g = geno(&geno_codes);
    for (i, &code) in geno_codes.iter().enumerate() {
        assert_eq!(g.get(i).unwrap().code(), code);
    }
}

#[test]
fn genotype_from_haplotypes_sums_with_missing_propagation() {
    let built = Genotype::from_haplotypes(&hap(&[1, 0, 1, 1, 1, 0]), &hap(&[1, 1, 0, 9, 1, 0]))
        .expect("equal lengths");
    assert_eq!(built, geno(&[2, 1, 1, 9, 2, 0]));
}

#[test]
fn haplotype_compatibility_follows_dosage_rules() {
    let g = geno(&[1, 0, 2, 1, 2, 0]);
    assert!(g.is_haplotype_compatible(&hap(&[1, 0, 1, 1, 1, 0])).unwrap());
    assert!(!g.is_haplotype_compatible(&hap(&[1, 0, 0, 1, 1, 0])).unwrap());
}

#[test]
fn mismatch_count_is_opposite_homozygotes_only() {
    let g = geno(&[1, 0, 2, 1, 2, 0]);
    assert_eq!(g.count_mismatches(&geno(&[1, 0, 2, 1, 1, 2])).unwrap(), 1);
    assert_eq!(g.count_mismatches(&geno(&[0, 0, 0, 0, 0, 2])).unwrap(), 3);
}

#[test]
fn num_het_counts_dosage_one() {
    assert_eq!(geno(&[1, 1, 1, 1, 1, 1, 1]).num_het(), 7);
    assert_eq!(geno(&[1, 0, 2, 1, 1, 2]).num_het(), 3);
}

#[test]
fn subset_genotype_is_a_typed_window() {
    let sub = geno(&[1, 0, 2, 1, 2, 0]).subset_genotype(2, 5).unwrap();
    assert_eq!(sub.len(), 3);
    assert_eq!(sub.to_codes(), vec![2, 1, 2]);
}

#[test]
fn slice_is_a_plain_dosage_sequence() {
    let window = geno(&[1, 0, 2, 1, 2, 0]).slice(2, 5).unwrap();
    let codes: Vec<u8> = window.into_iter().map(|d| d.code()).collect();
    assert_eq!(codes, vec![2, 1, 2]);
}

#[test]
fn fill_from_other_resolves_missing_loci() {
    let mut g = geno(&[1, 0, 9, 9]);
    g.set_from_other_if_missing(&geno(&[1, 0, 2, 2])).unwrap();
    assert_eq!(g, geno(&[1, 0, 2, 2]));
}

#[test]
fn fill_from_haplotypes_needs_both_calls_read() {
    let mut g = geno(&[1, 0, 9, 9]);
    g.set_from_haplotypes_if_missing(&hap(&[1, 9, 1, 0]), &hap(&[1, 0, 1, 1]))
        .unwrap();
    assert_eq!(g, geno(&[1, 0, 2, 1]));
}

#[test]
fn complement_deduces_the_other_gamete() {
    let c = geno(&[1, 0, 2, 2]).complement(&hap(&[1, 0, 1, 1])).unwrap();
    assert_eq!(c, hap(&[0, 0, 1, 1]));

    let c = geno(&[1, 0, 9, 2]).complement(&hap(&[0, 0, 1, 1])).unwrap();
    assert_eq!(c, hap(&[1, 0, 9, 1]));
}

#[test]
fn not_equal_counts_respect_missing_policy() {
    let a = geno(&[1, 9, 2, 9, 0, 1]);
    let b = geno(&[1, 2, 0, 9, 9, 1]);

    // unread is an ordinary value here; two unread calls are equal
    let plain = a.count_not_equal(&b).unwrap();
    assert_eq!(plain, 3);

    // a locus with an unread side is never counted
    let exclude = a.count_not_equal_exclude_missing(&b).unwrap();
    assert_eq!(exclude, 1);

    assert!(exclude <= plain);
}

#[test]
fn fill_from_other_is_idempotent() {
    let donor = geno(&[2, 9, 1, 0, 9]);
    let mut filled = geno(&[9, 9, 9, 1, 9]);
    filled.set_from_other_if_missing(&donor).unwrap();
    let after_once = filled.clone();
    filled.set_from_other_if_missing(&donor).unwrap();
    assert_eq!(filled, after_once);
}

#[test]
fn text_form_round_trips_through_the_construction_parser() {
    let g = geno(&[1, 0, 2, 1, 2, 0]);
    let parsed: Genotype = g.to_string().parse().unwrap();
    assert_eq!(parsed, g);

    let h = hap(&[1, 0, 9, 1]);
    let parsed: Haplotype = h.to_string().parse().unwrap();
    assert_eq!(parsed, h);
}

#[test]
fn errors_carry_the_spec_taxonomy() {
    // index outside [0, length)
    assert!(matches!(
        geno(&[1, 0]).get(2),
        Err(HaplokitError::IndexOutOfRange { index: 2, len: 2 })
    ));

    // malformed half-open ranges
    assert!(matches!(
        geno(&[1, 0, 2]).subset_genotype(2, 1),
        Err(HaplokitError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        geno(&[1, 0, 2]).slice(0, 4),
        Err(HaplokitError::IndexOutOfRange { .. })
    ));

    // unequal lengths
    assert!(matches!(
        Genotype::from_haplotypes(&hap(&[1, 0]), &hap(&[1, 0, 1])),
        Err(HaplokitError::LengthMismatch { left: 2, right: 3 })
    ));
    assert!(matches!(
        geno(&[1, 0]).count_not_equal(&geno(&[1, 0, 2])),
        Err(HaplokitError::LengthMismatch { .. })
    ));

    // construction values outside the call set
    assert!(matches!(
        Haplotype::from_codes(&[0, 1, 2]),
        Err(HaplokitError::InvalidAlleleValue { value: 2 })
    ));
    assert!(matches!(
        Genotype::from_codes(&[0, 4]),
        Err(HaplokitError::InvalidAlleleValue { value: 4 })
    ));
}

#[test]
fn failed_operations_do_not_mutate_the_receiver() {
    let mut g = geno(&[9, 1, 9]);
    let before = g.clone();
    assert!(g.set_from_other_if_missing(&geno(&[0, 0])).is_err());
    assert!(g
        .set_from_haplotypes_if_missing(&hap(&[0, 1]), &hap(&[0, 1]))
        .is_err());
    assert_eq!(g, before);
}
