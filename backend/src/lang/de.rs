use super::Table;

pub const HELPER: Table = &[
    ("Add", "Hinzufügen"),
    ("CentralizedDB", "Zentrale DB"),
    ("CentralizedFiles", "Zentrale Dateien"),
    ("Created", "Erstellt"),
    ("CreatedBy", "Erstellt von"),
    ("Creator", "Ersteller"),
    ("Data", "Daten"),
    ("Database", "Datenbank"),
    ("Dataset", "Datensatz"),
    ("Datasets", "Datensätze"),
    ("Description", "Beschreibung"),
    ("Edit", "Bearbeiten"),
    ("Expected", "Erwartet"),
    ("Export", "Export"),
    ("FileNames", "Dateinamen"),
    ("Files", "Dateien"),
    ("Helper", "Helper"),
    ("Helpers", "Helper"),
    ("IndividualDB", "Individuelle DB"),
    ("Info", "Info"),
    ("Language", "Sprache"),
    ("Load", "Laden"),
    ("Media", "Medien"),
    ("MediaDirectory", "Medienverzeichnis"),
    ("Modified", "Geändert"),
    ("Name", "Name"),
    ("New", "Neu"),
    ("Other", "Andere"),
    ("Overview", "Übersicht"),
    ("Permission", "Berechtigung"),
    ("Print", "Drucken"),
    ("Report", "Bericht"),
    ("Reports", "Berichte"),
    ("Select", "Auswählen"),
    ("Settings", "Einstellungen"),
    ("Source", "Quelle"),
    ("Sources", "Quellen"),
    ("Standalone", "Eigenständig"),
    ("Storage", "Speicher"),
    ("Tag", "Tag"),
    ("Tags", "Tags"),
    ("Template", "Vorlage"),
    ("Title", "Titel"),
    ("Type", "Typ"),
    ("Updated", "Aktualisiert"),
];

pub const NAVIGATION: Table = &[
    ("Create", "Erstellt"),
    ("CreateReport", "Erstelle Report"),
    ("CreateTemplate", "Erstelle Template"),
    ("Helper", "Helper"),
    ("List", "Liste"),
    ("Reporting", "Reporting"),
];
