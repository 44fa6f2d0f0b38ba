// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! The caller-facing generation request and its validated form.
//!
//! Wire field names follow the collaborator contract: `dateDebut`,
//! `dateFin`, `coursIds`, `groupeIds`, `ecraserAffectations`.

use crate::catalog::Catalog;
use crate::err::{PeriodOrderError, UnknownCourseError, UnknownGroupError, ValidationError};
use crate::id::{CourseId, GroupId};
use chrono::NaiveDate;
use class_alloc_core::calendar::DateRange;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Display;

/// An optional id filter with explicit empty-means-all semantics.
///
/// `Only(∅)` normalises to `All` at construction and deserialisation,
/// so an empty or omitted filter always selects the full catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScopeSet<I: Ord> {
    #[default]
    All,
    Only(BTreeSet<I>),
}

impl<I: Ord> ScopeSet<I> {
    pub fn from_ids(ids: impl IntoIterator<Item = I>) -> Self {
        let set: BTreeSet<I> = ids.into_iter().collect();
        if set.is_empty() {
            ScopeSet::All
        } else {
            ScopeSet::Only(set)
        }
    }

    #[inline]
    pub fn is_all(&self) -> bool {
        matches!(self, ScopeSet::All)
    }

    #[inline]
    pub fn includes(&self, id: &I) -> bool {
        match self {
            ScopeSet::All => true,
            ScopeSet::Only(ids) => ids.contains(id),
        }
    }

    pub fn iter_ids(&self) -> impl Iterator<Item = &I> {
        match self {
            ScopeSet::All => None,
            ScopeSet::Only(ids) => Some(ids.iter()),
        }
        .into_iter()
        .flatten()
    }
}

impl<I: Ord + Serialize> Serialize for ScopeSet<I> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ScopeSet::All => serializer.serialize_none(),
            ScopeSet::Only(ids) => serializer.serialize_some(ids),
        }
    }
}

impl<'de, I: Ord + Deserialize<'de>> Deserialize<'de> for ScopeSet<I> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ids = Option::<BTreeSet<I>>::deserialize(deserializer)?;
        Ok(match ids {
            None => ScopeSet::All,
            Some(ids) => ScopeSet::from_ids(ids),
        })
    }
}

/// A request to generate assignments over a period for a filtered set
/// of courses and groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(rename = "dateDebut")]
    start: NaiveDate,
    #[serde(rename = "dateFin")]
    end: NaiveDate,
    #[serde(rename = "coursIds", default)]
    courses: ScopeSet<CourseId>,
    #[serde(rename = "groupeIds", default)]
    groups: ScopeSet<GroupId>,
    #[serde(rename = "ecraserAffectations", default)]
    overwrite: bool,
}

impl GenerationRequest {
    #[inline]
    pub fn new(
        start: NaiveDate,
        end: NaiveDate,
        courses: ScopeSet<CourseId>,
        groups: ScopeSet<GroupId>,
        overwrite: bool,
    ) -> Self {
        Self {
            start,
            end,
            courses,
            groups,
            overwrite,
        }
    }

    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    #[inline]
    pub fn courses(&self) -> &ScopeSet<CourseId> {
        &self.courses
    }

    #[inline]
    pub fn groups(&self) -> &ScopeSet<GroupId> {
        &self.groups
    }

    #[inline]
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Checks the request against the catalog before any work happens.
    ///
    /// Rejects a period whose start does not strictly precede its end,
    /// and any filter id the catalog does not know.
    pub fn validate(&self, catalog: &Catalog) -> Result<ValidScope, ValidationError> {
        if self.start >= self.end {
            return Err(ValidationError::PeriodOrder(PeriodOrderError::new(
                self.start, self.end,
            )));
        }
        for id in self.courses.iter_ids() {
            if catalog.course(*id).is_none() {
                return Err(ValidationError::UnknownCourse(UnknownCourseError::new(*id)));
            }
        }
        for id in self.groups.iter_ids() {
            if catalog.group(*id).is_none() {
                return Err(ValidationError::UnknownGroup(UnknownGroupError::new(*id)));
            }
        }
        let period = DateRange::new(self.start, self.end)
            .expect("start precedes end after validation");
        Ok(ValidScope {
            period,
            courses: self.courses.clone(),
            groups: self.groups.clone(),
            overwrite: self.overwrite,
        })
    }
}

impl Display for GenerationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "GenerationRequest([{}, {}], overwrite: {})",
            self.start, self.end, self.overwrite
        )
    }
}

/// A validated request scope: the inclusive planning period plus the
/// normalised course and group filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidScope {
    period: DateRange,
    courses: ScopeSet<CourseId>,
    groups: ScopeSet<GroupId>,
    overwrite: bool,
}

impl ValidScope {
    #[inline]
    pub fn period(&self) -> DateRange {
        self.period
    }

    #[inline]
    pub fn courses(&self) -> &ScopeSet<CourseId> {
        &self.courses
    }

    #[inline]
    pub fn groups(&self) -> &ScopeSet<GroupId> {
        &self.groups
    }

    #[inline]
    pub fn overwrite(&self) -> bool {
        self.overwrite
    }

    /// Whether a (course, group, date) triple falls inside this scope.
    #[inline]
    pub fn covers(&self, course: CourseId, group: GroupId, date: NaiveDate) -> bool {
        self.courses.includes(&course)
            && self.groups.includes(&group)
            && self.period.contains(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Course, CourseLevel, RoomKind, Teacher};
    use crate::id::TeacherId;
    use class_alloc_core::units::Minutes;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).expect("valid date")
    }

    fn catalog_with_course_1() -> Catalog {
        let mut b = Catalog::builder();
        b.add_teacher(Teacher::new(TeacherId::new(1), "T1")).unwrap();
        b.add_course(Course::new(
            CourseId::new(1),
            "C1",
            Minutes::from_hours(2),
            Minutes::from_hours(2),
            CourseLevel::Introductory,
            RoomKind::Lecture,
            TeacherId::new(1),
        ))
        .unwrap();
        b.build()
    }

    #[test]
    fn test_scope_set_empty_means_all() {
        let scope: ScopeSet<CourseId> = ScopeSet::from_ids([]);
        assert!(scope.is_all());
        assert!(scope.includes(&CourseId::new(42)));
    }

    #[test]
    fn test_scope_set_only_filters() {
        let scope = ScopeSet::from_ids([CourseId::new(1), CourseId::new(2)]);
        assert!(!scope.is_all());
        assert!(scope.includes(&CourseId::new(1)));
        assert!(!scope.includes(&CourseId::new(3)));
    }

    #[test]
    fn test_inverted_period_rejected() {
        let catalog = catalog_with_course_1();
        let request = GenerationRequest::new(
            d(2025, 9, 5),
            d(2025, 9, 1),
            ScopeSet::All,
            ScopeSet::All,
            false,
        );
        assert!(matches!(
            request.validate(&catalog),
            Err(ValidationError::PeriodOrder(_))
        ));
    }

    #[test]
    fn test_unknown_course_rejected() {
        let catalog = catalog_with_course_1();
        let request = GenerationRequest::new(
            d(2025, 9, 1),
            d(2025, 9, 5),
            ScopeSet::from_ids([CourseId::new(99)]),
            ScopeSet::All,
            false,
        );
        assert!(matches!(
            request.validate(&catalog),
            Err(ValidationError::UnknownCourse(_))
        ));
    }

    #[test]
    fn test_valid_request_produces_inclusive_period() {
        let catalog = catalog_with_course_1();
        let request = GenerationRequest::new(
            d(2025, 9, 1),
            d(2025, 9, 5),
            ScopeSet::All,
            ScopeSet::All,
            true,
        );
        let scope = request.validate(&catalog).expect("valid request");
        assert_eq!(scope.period().len_days(), 5);
        assert!(scope.overwrite());
        assert!(scope.covers(CourseId::new(1), GroupId::new(9), d(2025, 9, 5)));
        assert!(!scope.covers(CourseId::new(1), GroupId::new(9), d(2025, 9, 6)));
    }

    #[test]
    fn test_wire_contract_deserialisation() {
        let json = r#"{
            "dateDebut": "2025-09-01",
            "dateFin": "2025-09-05",
            "coursIds": [1, 2],
            "ecraserAffectations": true
        }"#;
        let request: GenerationRequest = serde_json::from_str(json).expect("valid payload");
        assert_eq!(request.start(), d(2025, 9, 1));
        assert_eq!(request.end(), d(2025, 9, 5));
        assert_eq!(
            request.courses(),
            &ScopeSet::from_ids([CourseId::new(1), CourseId::new(2)])
        );
        assert!(request.groups().is_all());
        assert!(request.overwrite());
    }

    #[test]
    fn test_wire_contract_empty_filter_means_all() {
        let json = r#"{
            "dateDebut": "2025-09-01",
            "dateFin": "2025-09-05",
            "coursIds": [],
            "groupeIds": null
        }"#;
        let request: GenerationRequest = serde_json::from_str(json).expect("valid payload");
        assert!(request.courses().is_all());
        assert!(request.groups().is_all());
        assert!(!request.overwrite());
    }
}
