//! Aggregate queries for the reporting screens.
//!
//! Date windows are half-open `[start, end)` unix-timestamp ranges supplied
//! by the caller; calendar arithmetic (months, locales) stays off-chain.

use soroban_sdk::{contracttype, Env, Map, String, Vec};

use crate::{examination, medicine, patient, prescription, referral};

/// Headline counters for the reports landing page.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OverviewStats {
    pub total_patients: u32,
    pub new_patients: u32,
    pub total_examinations: u32,
    pub examinations_in_period: u32,
    pub total_referrals: u32,
    pub referrals_in_period: u32,
    pub total_medicines: u32,
    pub low_stock_medicines: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MedicineUsage {
    pub medicine_id: u64,
    pub name: String,
    pub count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DiagnosisCount {
    pub diagnosis: String,
    pub count: u32,
}

fn in_period(ts: u64, start: u64, end: u64) -> bool {
    ts >= start && ts < end
}

pub fn overview(
    env: &Env,
    period_start: u64,
    period_end: u64,
    low_stock_below: i64,
) -> OverviewStats {
    let patients = patient::ids(env);
    let exams = examination::ids(env);
    let referrals = referral::ids(env);
    let medicines = medicine::ids(env);

    let mut stats = OverviewStats {
        total_patients: patients.len(),
        new_patients: 0,
        total_examinations: exams.len(),
        examinations_in_period: 0,
        total_referrals: referrals.len(),
        referrals_in_period: 0,
        total_medicines: medicines.len(),
        low_stock_medicines: 0,
    };

    for id in patients.iter() {
        if let Some(p) = patient::get(env, id) {
            if in_period(p.created_at, period_start, period_end) {
                stats.new_patients += 1;
            }
        }
    }
    for id in exams.iter() {
        if let Some(e) = examination::get(env, id) {
            if in_period(e.examination_date, period_start, period_end) {
                stats.examinations_in_period += 1;
            }
        }
    }
    for id in referrals.iter() {
        if let Some(r) = referral::get(env, id) {
            if in_period(r.referral_date, period_start, period_end) {
                stats.referrals_in_period += 1;
            }
        }
    }
    for id in medicines.iter() {
        if let Some(m) = medicine::get(env, id) {
            if m.stock < low_stock_below {
                stats.low_stock_medicines += 1;
            }
        }
    }

    stats
}

/// Patients whose record was created inside the window.
pub fn patients_between(env: &Env, start: u64, end: u64) -> u32 {
    let mut count = 0;
    for id in patient::ids(env).iter() {
        if let Some(p) = patient::get(env, id) {
            if in_period(p.created_at, start, end) {
                count += 1;
            }
        }
    }
    count
}

/// Examinations dated inside the window.
pub fn examinations_between(env: &Env, start: u64, end: u64) -> u32 {
    let mut count = 0;
    for id in examination::ids(env).iter() {
        if let Some(e) = examination::get(env, id) {
            if in_period(e.examination_date, start, end) {
                count += 1;
            }
        }
    }
    count
}

/// Referrals dated inside the window.
pub fn referrals_between(env: &Env, start: u64, end: u64) -> u32 {
    let mut count = 0;
    for id in referral::ids(env).iter() {
        if let Some(r) = referral::get(env, id) {
            if in_period(r.referral_date, start, end) {
                count += 1;
            }
        }
    }
    count
}

/// Prescriptions whose owning examination is dated inside the window —
/// the medicine-usage chart series.
pub fn prescriptions_between(env: &Env, start: u64, end: u64) -> u32 {
    let mut count = 0;
    for id in examination::ids(env).iter() {
        if let Some(e) = examination::get(env, id) {
            if in_period(e.examination_date, start, end) {
                count += prescription::for_examination(env, id).len();
            }
        }
    }
    count
}

/// Most-prescribed medicines, descending by live prescription count.
pub fn top_medicines(env: &Env, limit: u32) -> Vec<MedicineUsage> {
    let mut counts: Map<u64, u32> = Map::new(env);
    for exam_id in examination::ids(env).iter() {
        for rx_id in prescription::for_examination(env, exam_id).iter() {
            if let Some(rx) = prescription::get(env, rx_id) {
                let n = counts.get(rx.medicine_id).unwrap_or(0);
                counts.set(rx.medicine_id, n + 1);
            }
        }
    }

    let mut top: Vec<MedicineUsage> = Vec::new(env);
    for (medicine_id, count) in counts.iter() {
        if let Some(m) = medicine::get(env, medicine_id) {
            let mut pos = 0u32;
            while pos < top.len() && top.get_unchecked(pos).count >= count {
                pos += 1;
            }
            top.insert(
                pos,
                MedicineUsage {
                    medicine_id,
                    name: m.name,
                    count,
                },
            );
            if top.len() > limit {
                top.pop_back();
            }
        }
    }
    top
}

/// Examinations group-counted by diagnosis text, descending.
pub fn diagnosis_distribution(env: &Env, limit: u32) -> Vec<DiagnosisCount> {
    let mut counts: Map<String, u32> = Map::new(env);
    for id in examination::ids(env).iter() {
        if let Some(e) = examination::get(env, id) {
            let n = counts.get(e.diagnosis.clone()).unwrap_or(0);
            counts.set(e.diagnosis, n + 1);
        }
    }

    let mut top: Vec<DiagnosisCount> = Vec::new(env);
    for (diagnosis, count) in counts.iter() {
        let mut pos = 0u32;
        while pos < top.len() && top.get_unchecked(pos).count >= count {
            pos += 1;
        }
        top.insert(pos, DiagnosisCount { diagnosis, count });
        if top.len() > limit {
            top.pop_back();
        }
    }
    top
}
